//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every section and
//! field is optional in the file and falls back to the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_DAILY_LIMIT_MINUTES;
use crate::error::{MindfulError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// Longest accepted interval between day-rollover checks.
pub const MAX_ROLLOVER_CHECK_SECS: u64 = 30;
/// Longest accepted interval between reset-countdown refreshes.
pub const MAX_COUNTDOWN_REFRESH_SECS: u64 = 10;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MindfulConfig {
    pub api: ApiConfig,
    pub clock: ClockSettings,
    pub storage: StorageConfig,
}

impl MindfulConfig {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(MindfulError::config("api.base_url must not be empty"));
        }
        self.clock.validate()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless set; a hung request keeps its in-flight guard
    /// until the transport gives up.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Timing knobs of the session clock.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClockSettings {
    pub default_daily_limit_minutes: u32,
    pub tick_millis: u64,
    pub rollover_check_secs: u64,
    pub countdown_refresh_secs: u64,
    pub persist_debounce_millis: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            default_daily_limit_minutes: DEFAULT_DAILY_LIMIT_MINUTES,
            tick_millis: 1_000,
            rollover_check_secs: MAX_ROLLOVER_CHECK_SECS,
            countdown_refresh_secs: MAX_COUNTDOWN_REFRESH_SECS,
            persist_debounce_millis: 500,
        }
    }
}

impl ClockSettings {
    pub fn validate(&self) -> Result<()> {
        if self.tick_millis == 0 {
            return Err(MindfulError::config("clock.tick_millis must be positive"));
        }
        if self.rollover_check_secs == 0 || self.rollover_check_secs > MAX_ROLLOVER_CHECK_SECS {
            return Err(MindfulError::config(format!(
                "clock.rollover_check_secs must be within 1..={}",
                MAX_ROLLOVER_CHECK_SECS
            )));
        }
        if self.countdown_refresh_secs == 0
            || self.countdown_refresh_secs > MAX_COUNTDOWN_REFRESH_SECS
        {
            return Err(MindfulError::config(format!(
                "clock.countdown_refresh_secs must be within 1..={}",
                MAX_COUNTDOWN_REFRESH_SECS
            )));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn rollover_check(&self) -> Duration {
        Duration::from_secs(self.rollover_check_secs)
    }

    pub fn countdown_refresh(&self) -> Duration {
        Duration::from_secs(self.countdown_refresh_secs)
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_millis)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the durable store; the platform config dir when unset.
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MindfulConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clock.default_daily_limit_minutes, 30);
        assert_eq!(config.clock.tick(), Duration::from_secs(1));
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MindfulConfig = toml::from_str(
            r#"
            [clock]
            rollover_check_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.clock.rollover_check_secs, 15);
        assert_eq!(config.clock.persist_debounce_millis, 500);
        assert!(config.api.request_timeout_secs.is_none());
    }

    #[test]
    fn test_rejects_slow_rollover_check() {
        let mut config = MindfulConfig::default();
        config.clock.rollover_check_secs = 60;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rollover_check_secs"));
    }
}
