//! Reply thread under one post.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mindful_core::discussion::{DiscussionApi, NewReply, Reply};
use tokio::sync::Mutex;

/// Inline message shown when an explicit load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Não foi possível carregar respostas.";

/// What the thread currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscussionView {
    /// Newest submissions first, then server order.
    pub replies: Vec<Reply>,
    /// `None` until a load succeeded.
    pub reply_count: Option<usize>,
    pub error: Option<String>,
    /// Compose-box text.
    pub draft: String,
    pub loading: bool,
    pub submitting: bool,
}

/// Controller of a post's discussion.
pub struct DiscussionThread {
    post_id: String,
    api: Arc<dyn DiscussionApi>,
    view: Mutex<DiscussionView>,
    detached: AtomicBool,
}

impl DiscussionThread {
    pub fn new(post_id: impl Into<String>, api: Arc<dyn DiscussionApi>) -> Self {
        Self {
            post_id: post_id.into(),
            api,
            view: Mutex::new(DiscussionView::default()),
            detached: AtomicBool::new(false),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub async fn view(&self) -> DiscussionView {
        self.view.lock().await.clone()
    }

    pub async fn set_draft(&self, draft: impl Into<String>) {
        self.view.lock().await.draft = draft.into();
    }

    /// Background load when the post is first shown.
    ///
    /// Fills replies and count; a failure is silent and leaves the count
    /// unknown.
    pub async fn initial_load(&self) {
        match self.api.list_replies(&self.post_id).await {
            Ok(replies) => {
                if self.is_detached() {
                    return;
                }
                let mut view = self.view.lock().await;
                view.reply_count = Some(replies.len());
                view.replies = replies;
            }
            Err(e) => {
                tracing::debug!(
                    "[DiscussionThread] Initial load of post {} failed: {}",
                    self.post_id,
                    e
                );
            }
        }
    }

    /// Explicit load; a failure is recorded as an inline error.
    pub async fn load(&self) {
        {
            let mut view = self.view.lock().await;
            view.loading = true;
            view.error = None;
        }

        let result = self.api.list_replies(&self.post_id).await;
        if self.is_detached() {
            return;
        }

        let mut view = self.view.lock().await;
        view.loading = false;
        match result {
            Ok(replies) => {
                view.reply_count = Some(replies.len());
                view.replies = replies;
            }
            Err(e) => {
                tracing::warn!(
                    "[DiscussionThread] Failed to load replies of post {}: {}",
                    self.post_id,
                    e
                );
                view.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Opens the thread, loading it unless replies are already present.
    pub async fn expand(&self) {
        let has_replies = !self.view.lock().await.replies.is_empty();
        if !has_replies {
            self.load().await;
        }
    }

    /// Submits the current draft.
    ///
    /// Blank drafts and submissions while another is pending do nothing.
    /// On success the reply is prepended, the count grows and the draft is
    /// cleared; on failure the draft is kept and the error only logged.
    pub async fn submit_reply(&self) -> Option<Reply> {
        let new_reply = {
            let mut view = self.view.lock().await;
            if view.submitting {
                return None;
            }
            let new_reply = NewReply::from_draft(&view.draft)?;
            view.submitting = true;
            new_reply
        };

        let result = self.api.create_reply(&self.post_id, &new_reply).await;

        let mut view = self.view.lock().await;
        view.submitting = false;
        match result {
            Ok(reply) => {
                if self.is_detached() {
                    return Some(reply);
                }
                view.replies.insert(0, reply.clone());
                view.reply_count = Some(match view.reply_count {
                    Some(count) => count + 1,
                    None => view.replies.len(),
                });
                view.draft.clear();
                Some(reply)
            }
            Err(e) => {
                tracing::warn!(
                    "[DiscussionThread] Failed to reply to post {}: {}",
                    self.post_id,
                    e
                );
                None
            }
        }
    }

    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }

    fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }
}
