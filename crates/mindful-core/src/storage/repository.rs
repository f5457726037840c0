//! Key-value store trait.

use async_trait::async_trait;

use crate::error::Result;

/// A durable, string-keyed, string-valued store scoped to one origin.
///
/// This trait decouples client state from the concrete medium (a JSON file
/// on disk, an in-memory map shared between tabs, a browser's local storage).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Missing keys as `Ok(None)`, never as an error
/// - Removing a missing key as a successful no-op
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: The medium could not be read
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`.
    async fn remove(&self, key: &str) -> Result<()>;
}
