use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A storage mutation made by another tab of the same origin.
///
/// Mirrors the browser `storage` event: it never fires in the tab that
/// performed the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange {
    pub key: String,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}

/// Events delivered by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The tab became visible (`true`) or hidden (`false`).
    VisibilityChanged { visible: bool },
    /// Another tab changed durable storage.
    StorageChanged(StorageChange),
}

/// Stream of [`HostEvent`]s.
#[async_trait]
pub trait HostEventSource: Send {
    /// Waits for the next event.
    ///
    /// Returns `None` once the host will not deliver any more events.
    async fn next_event(&mut self) -> Option<HostEvent>;
}

#[async_trait]
impl HostEventSource for mpsc::UnboundedReceiver<HostEvent> {
    async fn next_event(&mut self) -> Option<HostEvent> {
        self.recv().await
    }
}

#[async_trait]
impl HostEventSource for mpsc::Receiver<HostEvent> {
    async fn next_event(&mut self) -> Option<HostEvent> {
        self.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_source_delivers_then_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(HostEvent::VisibilityChanged { visible: false })
            .unwrap();
        drop(tx);

        assert_eq!(
            rx.next_event().await,
            Some(HostEvent::VisibilityChanged { visible: false })
        );
        assert_eq!(rx.next_event().await, None);
    }

    #[test]
    fn test_host_event_serialization() {
        let event = HostEvent::StorageChanged(StorageChange {
            key: "timeTrackingData".to_string(),
            new_value: None,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: HostEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
