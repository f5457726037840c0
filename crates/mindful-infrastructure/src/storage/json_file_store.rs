//! Durable key-value store persisted as one JSON object on disk.
//!
//! Provides:
//! - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
//! - **Durability**: Explicit fsync before rename
//! - **Isolation**: In-process writers are serialized by a mutex

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mindful_core::error::{MindfulError, Result};
use mindful_core::storage::KeyValueStore;
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

/// A [`KeyValueStore`] backed by a single JSON file.
///
/// All file I/O runs on the blocking pool.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store handle. The file is created on first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole map.
    ///
    /// A missing or empty file is an empty map; unparseable content is a
    /// serialization error.
    fn load_entries(path: &Path) -> Result<Entries> {
        if !path.exists() {
            return Ok(Entries::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the whole map atomically.
    fn save_entries(path: &Path, entries: &Entries) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        // Write to temporary file in the same directory
        let tmp_path = Self::temp_path(path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| MindfulError::io(format!("Path has no file name: {:?}", path)))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(path.with_file_name(tmp_name))
    }

    /// Read-modify-write under the write lock.
    ///
    /// A corrupt file is replaced rather than wedging every later write.
    async fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut entries = match Self::load_entries(&path) {
                Ok(entries) => entries,
                Err(e) if e.is_serialization() => {
                    tracing::warn!(
                        "[JsonFileStore] Discarding corrupt store {:?}: {}",
                        path,
                        e
                    );
                    Entries::new()
                }
                Err(e) => return Err(e),
            };
            f(&mut entries);
            Self::save_entries(&path, &entries)
        })
        .await
        .map_err(|e| MindfulError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            Self::load_entries(&path).map(|mut entries| entries.remove(&key))
        })
        .await
        .map_err(|e| MindfulError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.update(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.update(move |entries| {
            entries.remove(&key);
        })
        .await
    }
}
