//! The session clock state machine, free of timers and I/O.
//!
//! `SessionTracker` owns [`SessionState`] plus the transient `active` flag
//! and implements every transition the clock service performs. The service
//! decides *when* transitions happen (timers, host events, user calls);
//! this type decides *what* they do.

use chrono::NaiveDate;

use super::model::{RemoteSessionState, SessionState, SessionStateRecord, clamp_daily_limit};
use super::snapshot::{ClockPhase, ClockSnapshot};

/// Result of folding another tab's state into the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The remote payload was for another day and was dropped.
    Ignored,
    /// The remote payload changed nothing locally.
    Unchanged,
    /// Local state moved (counter advanced and/or limit adopted).
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTracker {
    state: SessionState,
    active: bool,
}

impl SessionTracker {
    /// Wraps an already validated state. The tracker starts active.
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            active: true,
        }
    }

    /// Rehydrates from a stored record (see [`SessionState::from_record`]).
    pub fn rehydrate(
        record: Option<&SessionStateRecord>,
        today: NaiveDate,
        default_limit: u32,
    ) -> Self {
        Self::new(SessionState::from_record(record, today, default_limit))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_limit_reached(&self) -> bool {
        self.state.is_limit_reached()
    }

    /// Whether the tick loop should be running.
    pub fn is_running(&self) -> bool {
        self.active && !self.is_limit_reached()
    }

    pub fn phase(&self) -> ClockPhase {
        if self.is_limit_reached() {
            ClockPhase::LimitReached
        } else if self.active {
            ClockPhase::Active
        } else {
            ClockPhase::Inactive
        }
    }

    pub fn snapshot(&self, time_until_reset_seconds: u64) -> ClockSnapshot {
        ClockSnapshot {
            time_spent_seconds: self.state.time_spent_seconds,
            daily_limit_minutes: self.state.daily_limit_minutes,
            last_active_date: self.state.last_active_date,
            is_active: self.active,
            is_limit_reached: self.is_limit_reached(),
            time_until_reset_seconds,
        }
    }

    /// One second of active use.
    ///
    /// Saturates at the limit: the increment that would cross it lands
    /// exactly on it, and later ticks are no-ops. Returns whether the
    /// counter moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let limit = self.state.limit_seconds();
        self.state.time_spent_seconds = (self.state.time_spent_seconds + 1).min(limit);
        true
    }

    /// Activates the clock unless the limit is already reached.
    pub fn start(&mut self) -> bool {
        if self.is_limit_reached() || self.active {
            return false;
        }
        self.active = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Manual reset: nothing spent, dated today, active again.
    pub fn reset_daily(&mut self, today: NaiveDate) -> bool {
        let before = self.clone();
        self.state.time_spent_seconds = 0;
        self.state.last_active_date = today;
        self.active = true;
        *self != before
    }

    /// Replaces the limit with `clamp(floor(minutes), 1, 480)`.
    ///
    /// The spent counter is never reduced; a limit below it puts the clock
    /// straight into [`ClockPhase::LimitReached`].
    pub fn update_daily_limit(&mut self, minutes: f64) -> bool {
        let limit = clamp_daily_limit(minutes);
        if limit == self.state.daily_limit_minutes {
            return false;
        }
        self.state.daily_limit_minutes = limit;
        true
    }

    /// Resets the day if `today` differs from the recorded date.
    ///
    /// A rollover also re-enables the clock so a user returning the next
    /// day is not left gated by yesterday's limit.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.state.last_active_date == today {
            return false;
        }
        self.state.time_spent_seconds = 0;
        self.state.last_active_date = today;
        self.active = true;
        true
    }

    /// Folds another tab's state in.
    ///
    /// Only same-day payloads are considered. The counter becomes
    /// `min(max(local, remote), remote_limit * 60)` and the remote limit is
    /// adopted, so progress made in any tab is never lost.
    pub fn merge_remote(&mut self, remote: &RemoteSessionState, today: NaiveDate) -> MergeOutcome {
        if remote.last_active_date != today {
            return MergeOutcome::Ignored;
        }
        self.roll_over(today);

        let limit = remote.daily_limit_minutes;
        let merged = self
            .state
            .time_spent_seconds
            .max(remote.time_spent_seconds)
            .min(limit * 60);

        if merged == self.state.time_spent_seconds && limit == self.state.daily_limit_minutes {
            return MergeOutcome::Unchanged;
        }
        self.state.time_spent_seconds = merged;
        self.state.daily_limit_minutes = limit;
        MergeOutcome::Merged
    }
}
