//! Device-local wall clock.
//!
//! The session clock only ever asks two questions of the outside world's
//! time: "what is today's date?" and "how far away is the next midnight?".
//! Both go through [`Calendar`] so tests can move the date deterministically.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

/// Source of device-local time.
pub trait Calendar: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Whole seconds until the next local midnight, never negative.
    fn seconds_until_midnight(&self) -> u64 {
        seconds_until_midnight(self.now())
    }
}

/// [`Calendar`] backed by the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Seconds between `now` and the following midnight.
pub fn seconds_until_midnight(now: NaiveDateTime) -> u64 {
    let next_day = now.date().succ_opt().unwrap_or(NaiveDate::MAX);
    let midnight = next_day.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MAX);
    let remaining = midnight.signed_duration_since(now);
    if remaining <= TimeDelta::zero() {
        0
    } else {
        remaining.num_seconds() as u64
    }
}
