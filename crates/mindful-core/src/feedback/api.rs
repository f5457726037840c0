//! Remote collaborator for feedback mutations.

use async_trait::async_trait;

use super::model::{FeedbackAction, FeedbackResponse};
use crate::error::Result;

/// The server side of like/dislike.
///
/// One method, parameterized by the action, so that the four endpoints are
/// data rather than four near-identical code paths.
#[async_trait]
pub trait PostFeedbackApi: Send + Sync {
    /// Performs `action` on `post_id` and returns the post's new feedback
    /// fields as reported by the server.
    async fn send_feedback(&self, post_id: &str, action: FeedbackAction)
    -> Result<FeedbackResponse>;
}
