//! Limit-related preference flags.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What should happen when the daily limit is reached.
///
/// Both flags default to off, matching a viewer who never opened the
/// settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitPreferences {
    pub alert_enabled: bool,
    pub auto_logout_enabled: bool,
}

/// Storage of [`LimitPreferences`] and the auto-logout bookkeeping.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn load_limit_preferences(&self) -> Result<LimitPreferences>;

    async fn save_limit_preferences(&self, preferences: LimitPreferences) -> Result<()>;

    /// Date of the last automatic logout, if any.
    async fn last_auto_logout(&self) -> Result<Option<NaiveDate>>;

    async fn record_auto_logout(&self, date: NaiveDate) -> Result<()>;
}
