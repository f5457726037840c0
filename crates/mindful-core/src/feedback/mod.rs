//! Quality feedback (like/dislike) domain module.
//!
//! # Module Structure
//!
//! - `model`: `FeedbackState`, `FeedbackDirection`, `FeedbackAction`, `FeedbackResponse`
//! - `reconcile`: Optimistic application and server reconciliation
//! - `api`: The remote collaborator trait

mod api;
mod model;
mod reconcile;

pub use api::PostFeedbackApi;
pub use model::{FeedbackAction, FeedbackDirection, FeedbackResponse, FeedbackState};
