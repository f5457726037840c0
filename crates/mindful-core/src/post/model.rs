use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackState;

/// A reflection as shown in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub community: String,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    pub edit_history: u32,
    /// Counters and the viewer's vote, as computed by the server for the
    /// requesting viewer.
    pub feedback: FeedbackState,
}

/// Body of a post submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    pub community: String,
}
