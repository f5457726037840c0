//! In-memory storage shared by several tabs of one origin.
//!
//! `OriginStorage` plays the role of a browser's per-origin local storage:
//! every [`TabStorage`] opened from it reads and writes the same entries,
//! and each write is announced to the *other* tabs as a
//! [`HostEvent::StorageChanged`], never to the writer itself. Writes that
//! do not change the stored value are not announced.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mindful_core::error::Result;
use mindful_core::storage::{HostEvent, HostEventSource, KeyValueStore, StorageChange};
use tokio::sync::{RwLock, broadcast, mpsc};
use uuid::Uuid;

const CHANGE_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct OriginChange {
    writer: Uuid,
    change: StorageChange,
}

struct OriginInner {
    entries: RwLock<HashMap<String, String>>,
    changes: broadcast::Sender<OriginChange>,
}

/// Entries shared by every tab of one origin.
#[derive(Clone)]
pub struct OriginStorage {
    inner: Arc<OriginInner>,
}

impl OriginStorage {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(OriginInner {
                entries: RwLock::new(HashMap::new()),
                changes,
            }),
        }
    }

    /// Opens a new tab with its own identity.
    pub fn open_tab(&self) -> TabStorage {
        TabStorage {
            tab_id: Uuid::new_v4(),
            origin: self.clone(),
        }
    }
}

impl Default for OriginStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// One tab's handle on an [`OriginStorage`].
#[derive(Clone)]
pub struct TabStorage {
    tab_id: Uuid,
    origin: OriginStorage,
}

impl TabStorage {
    pub fn tab_id(&self) -> Uuid {
        self.tab_id
    }

    /// Creates this tab's event stream.
    ///
    /// The stream carries storage changes made by other tabs plus whatever
    /// the host pushes through the returned [`HostEventSender`] (visibility
    /// changes).
    pub fn host_events(&self) -> (HostEventSender, TabEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let events = TabEvents {
            tab_id: self.tab_id,
            storage: self.origin.inner.changes.subscribe(),
            host: rx,
            storage_open: true,
            host_open: true,
        };
        (HostEventSender { tx }, events)
    }

    fn announce(&self, key: &str, new_value: Option<String>) {
        let change = OriginChange {
            writer: self.tab_id,
            change: StorageChange {
                key: key.to_string(),
                new_value,
            },
        };
        // No subscribers is not an error: nobody else is listening yet.
        let _ = self.origin.inner.changes.send(change);
    }
}

#[async_trait]
impl KeyValueStore for TabStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.origin.inner.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let changed = {
            let mut entries = self.origin.inner.entries.write().await;
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        };
        if changed {
            self.announce(key, Some(value.to_string()));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let removed = {
            let mut entries = self.origin.inner.entries.write().await;
            entries.remove(key).is_some()
        };
        if removed {
            self.announce(key, None);
        }
        Ok(())
    }
}

/// Pushes host-originated events (visibility) into a [`TabEvents`] stream.
#[derive(Clone)]
pub struct HostEventSender {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl HostEventSender {
    /// Returns false once the receiving side is gone.
    pub fn send(&self, event: HostEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn visibility_changed(&self, visible: bool) -> bool {
        self.send(HostEvent::VisibilityChanged { visible })
    }
}

/// Event stream of one tab.
pub struct TabEvents {
    tab_id: Uuid,
    storage: broadcast::Receiver<OriginChange>,
    host: mpsc::UnboundedReceiver<HostEvent>,
    storage_open: bool,
    host_open: bool,
}

#[async_trait]
impl HostEventSource for TabEvents {
    async fn next_event(&mut self) -> Option<HostEvent> {
        loop {
            if !self.storage_open && !self.host_open {
                return None;
            }
            tokio::select! {
                received = self.storage.recv(), if self.storage_open => match received {
                    Ok(change) if change.writer != self.tab_id => {
                        return Some(HostEvent::StorageChanged(change.change));
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "[TabEvents] Tab {} missed {} storage changes",
                            self.tab_id,
                            skipped
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => self.storage_open = false,
                },
                event = self.host.recv(), if self.host_open => match event {
                    Some(event) => return Some(event),
                    None => self.host_open = false,
                },
            }
        }
    }
}
