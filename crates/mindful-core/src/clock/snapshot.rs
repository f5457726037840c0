use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Share of the limit after which the tracker widget warns.
const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Coarse clock state.
///
/// `LimitReached` is left only by a day rollover, a manual reset or a
/// limit raise above the spent counter; never by `start()` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    Inactive,
    Active,
    LimitReached,
}

/// Read-only view of the clock published to UI consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockSnapshot {
    pub time_spent_seconds: u32,
    pub daily_limit_minutes: u32,
    pub last_active_date: NaiveDate,
    pub is_active: bool,
    pub is_limit_reached: bool,
    pub time_until_reset_seconds: u64,
}

impl ClockSnapshot {
    pub fn phase(&self) -> ClockPhase {
        if self.is_limit_reached {
            ClockPhase::LimitReached
        } else if self.is_active {
            ClockPhase::Active
        } else {
            ClockPhase::Inactive
        }
    }

    pub fn limit_seconds(&self) -> u32 {
        self.daily_limit_minutes * 60
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.limit_seconds().saturating_sub(self.time_spent_seconds)
    }

    /// Spent share of the limit, in percent.
    pub fn progress_percent(&self) -> f64 {
        let limit = self.limit_seconds();
        if limit == 0 {
            return 100.0;
        }
        (self.time_spent_seconds as f64 / limit as f64) * 100.0
    }

    /// At least 80% used but not yet over.
    pub fn is_near_limit(&self) -> bool {
        !self.is_limit_reached && self.progress_percent() >= NEAR_LIMIT_PERCENT
    }

    /// `MM:SS` of time spent.
    pub fn formatted_time_spent(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_spent_seconds / 60,
            self.time_spent_seconds % 60
        )
    }

    /// Countdown to midnight, only meaningful once the limit is reached.
    pub fn formatted_reset_countdown(&self) -> Option<String> {
        self.is_limit_reached
            .then(|| format_countdown(self.time_until_reset_seconds))
    }
}

/// Formats seconds as `"{h}h {m}m {s}s"`.
pub fn format_countdown(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{}h {}m {}s", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(spent: u32, limit: u32, active: bool) -> ClockSnapshot {
        ClockSnapshot {
            time_spent_seconds: spent,
            daily_limit_minutes: limit,
            last_active_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            is_active: active,
            is_limit_reached: spent >= limit * 60,
            time_until_reset_seconds: 3_725,
        }
    }

    #[test]
    fn test_phase() {
        assert_eq!(snapshot(0, 30, true).phase(), ClockPhase::Active);
        assert_eq!(snapshot(0, 30, false).phase(), ClockPhase::Inactive);
        assert_eq!(snapshot(1_800, 30, false).phase(), ClockPhase::LimitReached);
    }

    #[test]
    fn test_near_limit_threshold() {
        assert!(!snapshot(1_439, 30, true).is_near_limit());
        assert!(snapshot(1_440, 30, true).is_near_limit());
        assert!(!snapshot(1_800, 30, true).is_near_limit());
    }

    #[test]
    fn test_formatting() {
        let snap = snapshot(125, 30, true);
        assert_eq!(snap.formatted_time_spent(), "02:05");
        assert_eq!(snap.remaining_seconds(), 1_675);
        assert_eq!(snap.formatted_reset_countdown(), None);

        let reached = snapshot(1_800, 30, true);
        assert_eq!(
            reached.formatted_reset_countdown().as_deref(),
            Some("1h 2m 5s")
        );
        assert_eq!(format_countdown(0), "0h 0m 0s");
    }
}
