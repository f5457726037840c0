//! Access to the persisted session clock blob.

use std::sync::Arc;

use mindful_core::clock::{RemoteSessionState, SessionState, SessionStateRecord};
use mindful_core::storage::{KeyValueStore, StorageChange, keys};

/// Reads and writes [`SessionState`] under [`keys::SESSION_STATE`].
///
/// Every failure is absorbed here: a read error behaves like "nothing
/// stored", a corrupt blob is removed, and a failed write is logged.
#[derive(Clone)]
pub struct SessionStateStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStateStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the stored record, if a readable one exists.
    ///
    /// An unparseable payload is removed so the next start is clean.
    pub async fn load(&self) -> Option<SessionStateRecord> {
        let raw = match self.store.get(keys::SESSION_STATE).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[SessionStateStore] Failed to read session state: {}", e);
                return None;
            }
        };

        match SessionStateRecord::parse(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "[SessionStateStore] Discarding corrupt session state: {}",
                    e
                );
                if let Err(e) = self.store.remove(keys::SESSION_STATE).await {
                    tracing::warn!(
                        "[SessionStateStore] Failed to remove corrupt session state: {}",
                        e
                    );
                }
                None
            }
        }
    }

    /// Writes `state`. Best effort.
    pub async fn save(&self, state: &SessionState) {
        let json = match state.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("[SessionStateStore] Failed to serialize state: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::SESSION_STATE, &json).await {
            tracing::warn!("[SessionStateStore] Failed to persist state: {}", e);
        }
    }

    /// Interprets another tab's storage change.
    ///
    /// Returns `None` for other keys, removals, malformed payloads and
    /// payloads missing any field.
    pub fn parse_change(change: &StorageChange) -> Option<RemoteSessionState> {
        if change.key != keys::SESSION_STATE {
            return None;
        }
        let raw = change.new_value.as_deref()?;
        match SessionStateRecord::parse(raw) {
            Ok(record) => record.as_remote(),
            Err(e) => {
                tracing::debug!("[SessionStateStore] Ignoring malformed remote state: {}", e);
                None
            }
        }
    }
}
