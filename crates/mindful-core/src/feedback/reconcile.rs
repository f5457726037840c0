//! Optimistic application and server reconciliation of feedback actions.

use super::model::{FeedbackAction, FeedbackDirection, FeedbackResponse, FeedbackState};

impl FeedbackState {
    /// The state the viewer should see immediately after clicking.
    ///
    /// Counters floor at zero.
    pub fn apply(&self, action: FeedbackAction) -> FeedbackState {
        let mut next = *self;
        match action {
            FeedbackAction::RemoveLike => {
                next.viewer_has_liked = false;
                next.like_count = next.like_count.saturating_sub(1);
            }
            FeedbackAction::AddLike => {
                if next.viewer_has_disliked {
                    next.viewer_has_disliked = false;
                    next.dislike_count = next.dislike_count.saturating_sub(1);
                }
                next.viewer_has_liked = true;
                next.like_count = next.like_count.saturating_add(1);
            }
            FeedbackAction::RemoveDislike => {
                next.viewer_has_disliked = false;
                next.dislike_count = next.dislike_count.saturating_sub(1);
            }
            FeedbackAction::AddDislike => {
                if next.viewer_has_liked {
                    next.viewer_has_liked = false;
                    next.like_count = next.like_count.saturating_sub(1);
                }
                next.viewer_has_disliked = true;
                next.dislike_count = next.dislike_count.saturating_add(1);
            }
        }
        next
    }

    /// Merges the server's answer into the optimistic state.
    ///
    /// Every field present in `response` wins; absent fields keep the
    /// optimistic value. Should the result claim both votes, the one
    /// matching `action` is kept.
    pub fn reconcile(&self, action: FeedbackAction, response: &FeedbackResponse) -> FeedbackState {
        let mut next = FeedbackState {
            like_count: response
                .like_count
                .map(non_negative)
                .unwrap_or(self.like_count),
            dislike_count: response
                .dislike_count
                .map(non_negative)
                .unwrap_or(self.dislike_count),
            viewer_has_liked: response.viewer_has_liked.unwrap_or(self.viewer_has_liked),
            viewer_has_disliked: response
                .viewer_has_disliked
                .unwrap_or(self.viewer_has_disliked),
        };

        if next.viewer_has_liked && next.viewer_has_disliked {
            match action.direction() {
                FeedbackDirection::Like => next.viewer_has_disliked = false,
                FeedbackDirection::Dislike => next.viewer_has_liked = false,
            }
        }
        next
    }
}

fn non_negative(count: i64) -> u32 {
    count.clamp(0, u32::MAX as i64) as u32
}
