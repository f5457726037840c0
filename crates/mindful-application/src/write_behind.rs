//! Coalescing write-behind cache.
//!
//! Values handed to [`WriteBehind::schedule`] are not written right away:
//! the first value starts a fixed delay, later values replace it, and when
//! the delay elapses only the most recent one reaches the sink. Pending
//! values are written on [`WriteBehind::flush`] and when the handle is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mindful_core::clock::SessionState;
use mindful_infrastructure::SessionStateStore;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};

/// Destination of coalesced writes. Failures are the sink's business.
#[async_trait]
pub trait WriteSink<T>: Send + Sync {
    async fn write(&self, value: T);
}

#[async_trait]
impl WriteSink<SessionState> for SessionStateStore {
    async fn write(&self, value: SessionState) {
        self.save(&value).await;
    }
}

enum WriteCommand<T> {
    Put(T),
    Flush(oneshot::Sender<()>),
}

/// Handle on a background writer task.
pub struct WriteBehind<T> {
    tx: mpsc::UnboundedSender<WriteCommand<T>>,
}

impl<T: Send + 'static> WriteBehind<T> {
    /// Spawns the writer task on the current runtime.
    ///
    /// # Arguments
    ///
    /// * `sink` - Where values end up
    /// * `delay` - How long a value may stay pending
    pub fn spawn(sink: Arc<dyn WriteSink<T>>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(sink, delay, rx));
        Self { tx }
    }

    /// Replaces the pending value with `value`.
    pub fn schedule(&self, value: T) {
        if self.tx.send(WriteCommand::Put(value)).is_err() {
            tracing::warn!("[WriteBehind] Writer task is gone, value dropped");
        }
    }

    /// Writes the pending value now and waits until the sink accepted it.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

async fn run_writer<T>(
    sink: Arc<dyn WriteSink<T>>,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<WriteCommand<T>>,
) {
    let mut pending: Option<T> = None;
    let deadline = sleep_until(Instant::now());
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(WriteCommand::Put(value)) => {
                    if pending.is_none() {
                        deadline.as_mut().reset(Instant::now() + delay);
                    }
                    pending = Some(value);
                }
                Some(WriteCommand::Flush(done)) => {
                    if let Some(value) = pending.take() {
                        sink.write(value).await;
                    }
                    let _ = done.send(());
                }
                None => {
                    if let Some(value) = pending.take() {
                        sink.write(value).await;
                    }
                    tracing::debug!("[WriteBehind] Handle dropped, writer stopped");
                    break;
                }
            },
            () = &mut deadline, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    sink.write(value).await;
                }
            }
        }
    }
}
