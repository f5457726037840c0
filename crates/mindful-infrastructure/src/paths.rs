//! Unified path management for mindful files.
//!
//! ```text
//! ~/.config/mindful/           # Config directory (platform default)
//! ├── config.toml              # Client configuration
//! ├── storage.json             # Durable key-value store
//! └── logs/                    # Client logs
//!     └── mindful.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "mindful";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_FILE_NAME: &str = "storage.json";
const LOGS_DIR_NAME: &str = "logs";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mindful_core::MindfulError {
    fn from(err: PathError) -> Self {
        mindful_core::MindfulError::config(err.to_string())
    }
}

/// Resolves every on-disk location from one base directory.
///
/// The base is the platform config dir (`dirs::config_dir()/mindful`)
/// unless an override is given, which is what tests and portable installs
/// use.
#[derive(Debug, Clone)]
pub struct MindfulPaths {
    base: PathBuf,
}

impl MindfulPaths {
    /// Uses `base_override` when present, the platform config dir otherwise.
    pub fn new(base_override: Option<&Path>) -> Result<Self, PathError> {
        let base = match base_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(PathError::ConfigDirNotFound)?
                .join(APP_DIR_NAME),
        };
        Ok(Self { base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE_NAME)
    }

    pub fn store_file(&self) -> PathBuf {
        self.base.join(STORE_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join(LOGS_DIR_NAME)
    }
}
