//! Quality feedback domain models.

use serde::{Deserialize, Serialize};

/// Which thumb the viewer pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackDirection {
    Like,
    Dislike,
}

/// Per-post like/dislike counters plus the viewer's own vote.
///
/// At rest, at most one of `viewer_has_liked` / `viewer_has_disliked` is
/// true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackState {
    pub like_count: u32,
    pub dislike_count: u32,
    pub viewer_has_liked: bool,
    pub viewer_has_disliked: bool,
}

impl FeedbackState {
    /// The thumb currently pressed, if any.
    pub fn selected(&self) -> Option<FeedbackDirection> {
        if self.viewer_has_liked {
            Some(FeedbackDirection::Like)
        } else if self.viewer_has_disliked {
            Some(FeedbackDirection::Dislike)
        } else {
            None
        }
    }
}

/// The four remote mutations a click can turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackAction {
    AddLike,
    RemoveLike,
    AddDislike,
    RemoveDislike,
}

impl FeedbackAction {
    /// Chooses the action for a click in `direction` given the current vote.
    ///
    /// Pressing the thumb that is already selected toggles it off; pressing
    /// the other one applies it (clearing the opposite vote).
    pub fn plan(state: &FeedbackState, direction: FeedbackDirection) -> Self {
        match direction {
            FeedbackDirection::Like if state.viewer_has_liked => Self::RemoveLike,
            FeedbackDirection::Like => Self::AddLike,
            FeedbackDirection::Dislike if state.viewer_has_disliked => Self::RemoveDislike,
            FeedbackDirection::Dislike => Self::AddDislike,
        }
    }

    pub fn direction(&self) -> FeedbackDirection {
        match self {
            Self::AddLike | Self::RemoveLike => FeedbackDirection::Like,
            Self::AddDislike | Self::RemoveDislike => FeedbackDirection::Dislike,
        }
    }

    /// Last path segment of the endpoint: `POST /posts/{id}/{segment}`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::AddLike => "like",
            Self::RemoveLike => "unlike",
            Self::AddDislike => "dislike",
            Self::RemoveDislike => "undislike",
        }
    }
}

/// Authoritative post fields returned by a feedback mutation.
///
/// Every field is optional: the server is trusted for what it sends and
/// the optimistic value stands in for what it omits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub like_count: Option<i64>,
    pub dislike_count: Option<i64>,
    pub viewer_has_liked: Option<bool>,
    pub viewer_has_disliked: Option<bool>,
}
