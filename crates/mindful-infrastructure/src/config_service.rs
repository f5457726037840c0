//! Configuration service implementation.
//!
//! Loads [`MindfulConfig`] from `config.toml` and applies environment
//! overrides.

use std::path::Path;

use mindful_core::config::MindfulConfig;
use mindful_core::error::{MindfulError, Result};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "MINDFUL_API_URL";

pub struct ConfigService;

impl ConfigService {
    /// Loads the configuration file at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error. `MINDFUL_API_URL` wins over the file when set and non-empty.
    pub fn load(path: &Path) -> Result<MindfulConfig> {
        let mut config = Self::load_file(path)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            Self::apply_api_url_override(&mut config, &url);
        }
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<MindfulConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {:?}, using defaults",
                path
            );
            return Ok(MindfulConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            MindfulError::io(format!("Failed to read config {:?}: {}", path, e))
        })?;
        if content.trim().is_empty() {
            return Ok(MindfulConfig::default());
        }
        Ok(toml::from_str(&content)?)
    }

    fn apply_api_url_override(config: &mut MindfulConfig, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            tracing::warn!(
                "[ConfigService] {} is set but empty; keeping {}",
                API_URL_ENV,
                config.api.base_url
            );
            return;
        }
        config.api.base_url = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigService::load_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, MindfulConfig::default());
    }

    #[test]
    fn test_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.example.test\"\n\n[clock]\ndefault_daily_limit_minutes = 45\n",
        )
        .unwrap();

        let config = ConfigService::load_file(&path).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.test");
        assert_eq!(config.clock.default_daily_limit_minutes, 45);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[clock\nbroken").unwrap();

        let err = ConfigService::load_file(&path).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_api_url_override() {
        let mut config = MindfulConfig::default();
        ConfigService::apply_api_url_override(&mut config, "  ");
        assert_eq!(config.api.base_url, "http://localhost:3333");

        ConfigService::apply_api_url_override(&mut config, "https://prod.example.test/");
        assert_eq!(config.api.base_url, "https://prod.example.test/");
    }
}
