//! Storage adapters.
//!
//! # Module Structure
//!
//! - `json_file_store`: Durable [`KeyValueStore`](mindful_core::storage::KeyValueStore) on disk
//! - `origin_storage`: Shared in-memory store with cross-tab change events
//! - `session_state_store`: Typed access to the session clock blob
//! - `preferences`: Limit preference flags

mod json_file_store;
mod origin_storage;
mod preferences;
mod session_state_store;

pub use json_file_store::JsonFileStore;
pub use origin_storage::{HostEventSender, OriginStorage, TabEvents, TabStorage};
pub use preferences::KvPreferencesRepository;
pub use session_state_store::SessionStateStore;
