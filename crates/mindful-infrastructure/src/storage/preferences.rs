//! Limit preference flags stored as plain strings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mindful_core::error::Result;
use mindful_core::storage::{KeyValueStore, keys};
use mindful_core::user::{LimitPreferences, PreferencesRepository};

/// [`PreferencesRepository`] over a [`KeyValueStore`].
///
/// Flags are the strings `"true"`/`"false"`; anything else reads as off.
pub struct KvPreferencesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPreferencesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.store.get(key).await?.as_deref() == Some("true"))
    }

    async fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.store
            .set(key, if value { "true" } else { "false" })
            .await
    }
}

#[async_trait]
impl PreferencesRepository for KvPreferencesRepository {
    async fn load_limit_preferences(&self) -> Result<LimitPreferences> {
        Ok(LimitPreferences {
            alert_enabled: self.flag(keys::TIME_ALERT_ENABLED).await?,
            auto_logout_enabled: self.flag(keys::AUTO_LOGOUT_ENABLED).await?,
        })
    }

    async fn save_limit_preferences(&self, preferences: LimitPreferences) -> Result<()> {
        self.set_flag(keys::TIME_ALERT_ENABLED, preferences.alert_enabled)
            .await?;
        self.set_flag(keys::AUTO_LOGOUT_ENABLED, preferences.auto_logout_enabled)
            .await
    }

    async fn last_auto_logout(&self) -> Result<Option<NaiveDate>> {
        let raw = self.store.get(keys::AUTO_LOGGED_OUT_AT).await?;
        Ok(raw.and_then(|raw| raw.trim().parse::<NaiveDate>().ok()))
    }

    async fn record_auto_logout(&self, date: NaiveDate) -> Result<()> {
        self.store
            .set(keys::AUTO_LOGGED_OUT_AT, &date.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::OriginStorage;

    #[tokio::test]
    async fn test_flags_default_off() {
        let repo = KvPreferencesRepository::new(Arc::new(OriginStorage::new().open_tab()));
        assert_eq!(
            repo.load_limit_preferences().await.unwrap(),
            LimitPreferences::default()
        );
        assert_eq!(repo.last_auto_logout().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flags_use_string_values() {
        let tab = Arc::new(OriginStorage::new().open_tab());
        let repo = KvPreferencesRepository::new(tab.clone());
        repo.save_limit_preferences(LimitPreferences {
            alert_enabled: true,
            auto_logout_enabled: false,
        })
        .await
        .unwrap();

        assert_eq!(
            tab.get(keys::TIME_ALERT_ENABLED).await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            tab.get(keys::AUTO_LOGOUT_ENABLED).await.unwrap().as_deref(),
            Some("false")
        );

        tab.set(keys::AUTO_LOGOUT_ENABLED, "yes").await.unwrap();
        assert!(!repo.load_limit_preferences().await.unwrap().auto_logout_enabled);
    }

    #[tokio::test]
    async fn test_auto_logout_date_round_trip() {
        let repo = KvPreferencesRepository::new(Arc::new(OriginStorage::new().open_tab()));
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        repo.record_auto_logout(date).await.unwrap();
        assert_eq!(repo.last_auto_logout().await.unwrap(), Some(date));
    }
}
