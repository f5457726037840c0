//! Persisted session clock state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{MindfulError, Result};

/// Smallest accepted daily limit, in minutes.
pub const MIN_DAILY_LIMIT_MINUTES: u32 = 1;
/// Largest accepted daily limit, in minutes (8 hours).
pub const MAX_DAILY_LIMIT_MINUTES: u32 = 480;
/// Limit used when nothing valid is stored.
pub const DEFAULT_DAILY_LIMIT_MINUTES: u32 = 30;

/// Older builds wrote dates with the `Date.toDateString()` layout.
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Clamps an externally supplied limit to `[1, 480]` after flooring it.
///
/// NaN maps to the minimum.
pub fn clamp_daily_limit(minutes: f64) -> u32 {
    if minutes.is_nan() {
        return MIN_DAILY_LIMIT_MINUTES;
    }
    minutes.floor().clamp(
        MIN_DAILY_LIMIT_MINUTES as f64,
        MAX_DAILY_LIMIT_MINUTES as f64,
    ) as u32
}

/// Day-scoped usage counters, exactly as persisted under
/// [`crate::storage::keys::SESSION_STATE`].
///
/// Invariants (upheld by every constructor and by
/// [`super::SessionTracker`]):
/// - `daily_limit_minutes` is within `[1, 480]`
/// - `time_spent_seconds <= daily_limit_minutes * 60`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub time_spent_seconds: u32,
    pub daily_limit_minutes: u32,
    pub last_active_date: NaiveDate,
}

impl SessionState {
    /// A fresh day: nothing spent, `daily_limit_minutes` clamped.
    pub fn fresh(today: NaiveDate, daily_limit_minutes: u32) -> Self {
        Self {
            time_spent_seconds: 0,
            daily_limit_minutes: clamp_daily_limit(daily_limit_minutes as f64),
            last_active_date: today,
        }
    }

    /// Rebuilds state from whatever was found in storage.
    ///
    /// - No record: a fresh day with `default_limit`.
    /// - Record from today: spent restored, clamped to the stored limit.
    /// - Record from another day (or an unreadable date): spent reset to 0.
    ///
    /// The stored limit survives in every case where one was present.
    pub fn from_record(
        record: Option<&SessionStateRecord>,
        today: NaiveDate,
        default_limit: u32,
    ) -> Self {
        let Some(record) = record else {
            return Self::fresh(today, default_limit);
        };

        let daily_limit_minutes = record
            .daily_limit_minutes
            .map(clamp_daily_limit)
            .unwrap_or_else(|| clamp_daily_limit(default_limit as f64));

        let time_spent_seconds = if record.date() == Some(today) {
            clamp_spent(record.time_spent_seconds.unwrap_or(0.0), daily_limit_minutes)
        } else {
            0
        };

        Self {
            time_spent_seconds,
            daily_limit_minutes,
            last_active_date: today,
        }
    }

    /// The limit expressed in seconds.
    pub fn limit_seconds(&self) -> u32 {
        self.daily_limit_minutes * 60
    }

    pub fn is_limit_reached(&self) -> bool {
        self.time_spent_seconds >= self.limit_seconds()
    }

    /// Serializes to the storage payload.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Floors and clamps a raw spent value into `[0, limit * 60]`.
fn clamp_spent(raw: f64, daily_limit_minutes: u32) -> u32 {
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    let limit_seconds = (daily_limit_minutes * 60) as f64;
    raw.floor().min(limit_seconds) as u32
}

/// Lenient view of a stored (or cross-tab) payload.
///
/// Every field is optional and numbers may be fractional, so that old or
/// hand-edited blobs still rehydrate. A payload that is not a JSON object
/// fails to parse and is treated as corrupt by callers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateRecord {
    #[serde(default, alias = "timeSpent")]
    pub time_spent_seconds: Option<f64>,
    #[serde(default, alias = "dailyLimit")]
    pub daily_limit_minutes: Option<f64>,
    #[serde(default)]
    pub last_active_date: Option<String>,
}

impl SessionStateRecord {
    /// Parses a raw payload.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(MindfulError::Serialization {
                format: "JSON".to_string(),
                message: "session state payload is not an object".to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The recorded date, accepting ISO (`2026-10-16`) and the legacy
    /// `Fri Oct 16 2026` layout.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.last_active_date.as_deref()?.trim();
        raw.parse::<NaiveDate>()
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT).ok())
    }

    /// Validates the record as another tab's authoritative state.
    ///
    /// Returns `None` unless the date, the spent counter and the limit are
    /// all present and readable.
    pub fn as_remote(&self) -> Option<RemoteSessionState> {
        let date = self.date()?;
        let spent = self.time_spent_seconds?;
        let limit = self.daily_limit_minutes?;
        let daily_limit_minutes = clamp_daily_limit(limit);
        Some(RemoteSessionState {
            last_active_date: date,
            time_spent_seconds: clamp_spent(spent, daily_limit_minutes),
            daily_limit_minutes,
        })
    }
}

/// Validated state announced by another tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteSessionState {
    pub last_active_date: NaiveDate,
    pub time_spent_seconds: u32,
    pub daily_limit_minutes: u32,
}

impl RemoteSessionState {
    /// The remote payload as a [`SessionState`].
    pub fn as_state(&self) -> SessionState {
        SessionState {
            time_spent_seconds: self.time_spent_seconds,
            daily_limit_minutes: self.daily_limit_minutes,
            last_active_date: self.last_active_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_clamp_daily_limit() {
        assert_eq!(clamp_daily_limit(0.0), 1);
        assert_eq!(clamp_daily_limit(-15.0), 1);
        assert_eq!(clamp_daily_limit(1.9), 1);
        assert_eq!(clamp_daily_limit(45.7), 45);
        assert_eq!(clamp_daily_limit(480.0), 480);
        assert_eq!(clamp_daily_limit(10_000.0), 480);
        assert_eq!(clamp_daily_limit(f64::NAN), 1);
        assert_eq!(clamp_daily_limit(f64::INFINITY), 480);
    }

    #[test]
    fn test_from_record_same_day_restores_clamped() {
        let record = SessionStateRecord {
            time_spent_seconds: Some(9_999.0),
            daily_limit_minutes: Some(60.0),
            last_active_date: Some("2026-10-16".to_string()),
        };
        let state = SessionState::from_record(Some(&record), day(16), 30);
        assert_eq!(state.daily_limit_minutes, 60);
        assert_eq!(state.time_spent_seconds, 3_600);
        assert!(state.is_limit_reached());
    }

    #[test]
    fn test_from_record_other_day_resets_spent() {
        let record = SessionStateRecord {
            time_spent_seconds: Some(1_200.0),
            daily_limit_minutes: Some(45.0),
            last_active_date: Some("2026-10-15".to_string()),
        };
        let state = SessionState::from_record(Some(&record), day(16), 30);
        assert_eq!(state.time_spent_seconds, 0);
        assert_eq!(state.daily_limit_minutes, 45);
        assert_eq!(state.last_active_date, day(16));
    }

    #[test]
    fn test_from_record_unreadable_date_resets_spent() {
        let record = SessionStateRecord {
            time_spent_seconds: Some(100.0),
            daily_limit_minutes: None,
            last_active_date: Some("yesterday-ish".to_string()),
        };
        let state = SessionState::from_record(Some(&record), day(16), 30);
        assert_eq!(state.time_spent_seconds, 0);
        assert_eq!(state.daily_limit_minutes, 30);
    }

    #[test]
    fn test_parse_accepts_legacy_layout() {
        let record = SessionStateRecord::parse(
            r#"{"timeSpent": 120.6, "dailyLimit": 30, "lastActiveDate": "Fri Oct 16 2026", "lastTick": 1}"#,
        )
        .unwrap();
        assert_eq!(record.date(), Some(day(16)));
        let state = SessionState::from_record(Some(&record), day(16), 30);
        assert_eq!(state.time_spent_seconds, 120);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(SessionStateRecord::parse("{not json").is_err());
        assert!(SessionStateRecord::parse("[1, 2]").is_err());
        assert!(SessionStateRecord::parse("42").is_err());
        assert!(SessionStateRecord::parse(r#"{"timeSpentSeconds": "lots"}"#).is_err());
    }

    #[test]
    fn test_as_remote_requires_all_fields() {
        let partial = SessionStateRecord {
            time_spent_seconds: Some(10.0),
            daily_limit_minutes: None,
            last_active_date: Some("2026-10-16".to_string()),
        };
        assert!(partial.as_remote().is_none());

        let full = SessionStateRecord {
            daily_limit_minutes: Some(1.0),
            time_spent_seconds: Some(500.0),
            ..partial
        };
        let remote = full.as_remote().unwrap();
        assert_eq!(remote.daily_limit_minutes, 1);
        assert_eq!(remote.time_spent_seconds, 60);
    }

    #[test]
    fn test_state_json_layout() {
        let state = SessionState {
            time_spent_seconds: 42,
            daily_limit_minutes: 30,
            last_active_date: day(16),
        };
        let json = state.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"timeSpentSeconds":42,"dailyLimitMinutes":30,"lastActiveDate":"2026-10-16"}"#
        );
        let record = SessionStateRecord::parse(&json).unwrap();
        assert_eq!(SessionState::from_record(Some(&record), day(16), 5), state);
    }
}
