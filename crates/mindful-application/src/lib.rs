//! Application layer for the Mindful client.
//!
//! This crate runs the domain state machines against a tokio runtime and
//! the infrastructure adapters: the session clock task, optimistic post
//! feedback, discussion threads, the limit-reached policy and read
//! fallbacks for feeds, communities and stats.

pub mod bootstrap;
pub mod discussion_thread;
pub mod feedback_reconciler;
pub mod limit_policy;
pub mod optimistic;
pub mod overview;
pub mod session_clock;
pub mod write_behind;

pub use bootstrap::{AppContext, NativeEventSender};
pub use discussion_thread::{DiscussionThread, DiscussionView};
pub use feedback_reconciler::PostFeedback;
pub use limit_policy::{LimitNotice, LimitPolicy, LimitWatcher};
pub use optimistic::{MutationOutcome, OptimisticCell, OptimisticMutation};
pub use overview::Overview;
pub use session_clock::SessionClock;
pub use write_behind::{WriteBehind, WriteSink};
