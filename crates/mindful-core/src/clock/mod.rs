//! Session clock domain module.
//!
//! Day-scoped usage tracking against a configurable daily limit.
//!
//! # Module Structure
//!
//! - `model`: Persisted state (`SessionState`) and the lenient storage record
//! - `tracker`: The timer-free state machine (`SessionTracker`)
//! - `snapshot`: Read-only views for UI consumers (`ClockSnapshot`, `ClockPhase`)

mod model;
mod snapshot;
mod tracker;

pub use model::{
    DEFAULT_DAILY_LIMIT_MINUTES, MAX_DAILY_LIMIT_MINUTES, MIN_DAILY_LIMIT_MINUTES,
    RemoteSessionState, SessionState, SessionStateRecord, clamp_daily_limit,
};
pub use snapshot::{ClockPhase, ClockSnapshot, format_countdown};
pub use tracker::{MergeOutcome, SessionTracker};
