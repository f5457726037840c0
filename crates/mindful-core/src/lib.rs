//! Domain layer of the Mindful client.
//!
//! Models, timer-free state machines and the capability traits the outer
//! layers implement. Nothing in this crate performs I/O.

pub mod calendar;
pub mod clock;
pub mod community;
pub mod config;
pub mod discussion;
pub mod error;
pub mod feedback;
pub mod post;
pub mod stats;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::MindfulError;
