//! Per-post like/dislike controller.

use std::sync::Arc;

use async_trait::async_trait;
use mindful_core::error::Result;
use mindful_core::feedback::{
    FeedbackAction, FeedbackDirection, FeedbackResponse, FeedbackState, PostFeedbackApi,
};
use mindful_core::post::Post;

use crate::optimistic::{MutationOutcome, OptimisticCell, OptimisticMutation};

/// One feedback click turned into a remote action.
struct FeedbackMutation {
    api: Arc<dyn PostFeedbackApi>,
    post_id: String,
    action: FeedbackAction,
}

#[async_trait]
impl OptimisticMutation for FeedbackMutation {
    type State = FeedbackState;
    type Response = FeedbackResponse;

    fn apply(&self, state: &FeedbackState) -> FeedbackState {
        state.apply(self.action)
    }

    async fn perform(&self) -> Result<FeedbackResponse> {
        self.api.send_feedback(&self.post_id, self.action).await
    }

    fn reconcile(&self, optimistic: &FeedbackState, response: FeedbackResponse) -> FeedbackState {
        optimistic.reconcile(self.action, &response)
    }
}

/// Feedback state of one rendered post.
///
/// Clicks are strictly sequential: while a request is in flight further
/// clicks are ignored. Call [`PostFeedback::detach`] when the post goes
/// away so that a late answer leaves no trace.
pub struct PostFeedback {
    post_id: String,
    api: Arc<dyn PostFeedbackApi>,
    cell: OptimisticCell<FeedbackState>,
}

impl PostFeedback {
    pub fn new(
        post_id: impl Into<String>,
        initial: FeedbackState,
        api: Arc<dyn PostFeedbackApi>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            api,
            cell: OptimisticCell::new(initial),
        }
    }

    pub fn for_post(post: &Post, api: Arc<dyn PostFeedbackApi>) -> Self {
        Self::new(post.id.clone(), post.feedback, api)
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Current counters and vote.
    pub async fn state(&self) -> FeedbackState {
        self.cell.current().await
    }

    pub fn is_in_flight(&self) -> bool {
        self.cell.is_in_flight()
    }

    /// Handles a click on the like (or dislike) button.
    ///
    /// Failures are logged and rolled back; they are reported in the
    /// outcome but never raised.
    pub async fn submit_feedback(&self, direction: FeedbackDirection) -> MutationOutcome {
        let outcome = self
            .cell
            .run(|state| {
                let action = FeedbackAction::plan(state, direction);
                tracing::debug!("[PostFeedback] {} -> {:?}", self.post_id, action);
                FeedbackMutation {
                    api: self.api.clone(),
                    post_id: self.post_id.clone(),
                    action,
                }
            })
            .await;

        match &outcome {
            MutationOutcome::RolledBack(e) => {
                tracing::warn!(
                    "[PostFeedback] Feedback on post {} failed, rolled back: {}",
                    self.post_id,
                    e
                );
            }
            MutationOutcome::Ignored => {
                tracing::debug!(
                    "[PostFeedback] Click on post {} ignored, request in flight",
                    self.post_id
                );
            }
            MutationOutcome::Stale => {
                tracing::debug!("[PostFeedback] Post {} detached", self.post_id);
            }
            MutationOutcome::Applied => {}
        }
        outcome
    }

    pub async fn like(&self) -> MutationOutcome {
        self.submit_feedback(FeedbackDirection::Like).await
    }

    pub async fn dislike(&self) -> MutationOutcome {
        self.submit_feedback(FeedbackDirection::Dislike).await
    }

    /// Stops accepting answers; the displayed state is frozen.
    pub fn detach(&self) {
        self.cell.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_core::error::MindfulError;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    /// Scripted server: answers from a queue, optionally held until released.
    #[derive(Default)]
    struct MockFeedbackApi {
        answers: StdMutex<Vec<Result<FeedbackResponse>>>,
        calls: StdMutex<Vec<(String, FeedbackAction)>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockFeedbackApi {
        fn answering(answers: Vec<Result<FeedbackResponse>>) -> Self {
            Self {
                answers: StdMutex::new(answers),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, FeedbackAction)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostFeedbackApi for MockFeedbackApi {
        async fn send_feedback(
            &self,
            post_id: &str,
            action: FeedbackAction,
        ) -> Result<FeedbackResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((post_id.to_string(), action));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let mut answers = self.answers.lock().unwrap();
            if answers.is_empty() {
                Ok(FeedbackResponse::default())
            } else {
                answers.remove(0)
            }
        }
    }

    fn state(likes: u32, dislikes: u32, liked: bool, disliked: bool) -> FeedbackState {
        FeedbackState {
            like_count: likes,
            dislike_count: dislikes,
            viewer_has_liked: liked,
            viewer_has_disliked: disliked,
        }
    }

    fn server(likes: i64, dislikes: i64, liked: bool, disliked: bool) -> FeedbackResponse {
        FeedbackResponse {
            like_count: Some(likes),
            dislike_count: Some(dislikes),
            viewer_has_liked: Some(liked),
            viewer_has_disliked: Some(disliked),
        }
    }

    #[tokio::test]
    async fn test_like_switches_from_dislike_and_matches_server() {
        let api = Arc::new(MockFeedbackApi::answering(vec![Ok(server(4, 0, true, false))]));
        let feedback = PostFeedback::new("p1", state(3, 1, false, true), api.clone());

        let outcome = feedback.like().await;

        assert!(outcome.is_applied());
        assert_eq!(feedback.state().await, state(4, 0, true, false));
        assert_eq!(api.calls(), vec![("p1".to_string(), FeedbackAction::AddLike)]);
    }

    #[tokio::test]
    async fn test_failed_like_restores_every_field() {
        let api = Arc::new(MockFeedbackApi::answering(vec![Err(MindfulError::network(
            "offline",
        ))]));
        let feedback = PostFeedback::new("p1", state(3, 1, false, true), api);

        let outcome = feedback.like().await;

        assert!(matches!(outcome, MutationOutcome::RolledBack(_)));
        assert_eq!(feedback.state().await, state(3, 1, false, true));
        assert!(!feedback.is_in_flight());
    }

    #[tokio::test]
    async fn test_second_click_toggles_back() {
        let api = Arc::new(MockFeedbackApi::default());
        let feedback = PostFeedback::new("p2", state(7, 2, false, false), api.clone());

        feedback.like().await;
        assert_eq!(feedback.state().await, state(8, 2, true, false));
        feedback.like().await;
        assert_eq!(feedback.state().await, state(7, 2, false, false));

        let actions: Vec<_> = api.calls().into_iter().map(|(_, a)| a).collect();
        assert_eq!(actions, vec![FeedbackAction::AddLike, FeedbackAction::RemoveLike]);
    }

    #[tokio::test]
    async fn test_partial_response_falls_back_to_optimistic() {
        let api = Arc::new(MockFeedbackApi::answering(vec![Ok(FeedbackResponse {
            like_count: Some(12),
            ..Default::default()
        })]));
        let feedback = PostFeedback::new("p3", state(3, 1, false, true), api);

        feedback.like().await;
        assert_eq!(feedback.state().await, state(12, 0, true, false));
    }

    #[tokio::test]
    async fn test_clicks_while_in_flight_are_ignored() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockFeedbackApi {
            gate: Some(gate.clone()),
            answers: StdMutex::new(vec![Ok(server(1, 0, true, false))]),
            ..Default::default()
        });
        let feedback = Arc::new(PostFeedback::new("p4", state(0, 0, false, false), api.clone()));

        let first = {
            let feedback = feedback.clone();
            tokio::spawn(async move { feedback.like().await })
        };
        while api.calls().is_empty() {
            tokio::task::yield_now().await;
        }
        assert!(feedback.is_in_flight());
        assert_eq!(feedback.state().await, state(1, 0, true, false));

        assert!(matches!(feedback.dislike().await, MutationOutcome::Ignored));
        assert!(matches!(feedback.like().await, MutationOutcome::Ignored));

        gate.notify_one();
        assert!(first.await.unwrap().is_applied());
        assert_eq!(api.calls().len(), 1);
        assert!(!feedback.is_in_flight());
    }

    #[tokio::test]
    async fn test_detach_discards_late_answer() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockFeedbackApi {
            gate: Some(gate.clone()),
            answers: StdMutex::new(vec![Ok(server(50, 50, true, false))]),
            ..Default::default()
        });
        let feedback = Arc::new(PostFeedback::new("p5", state(0, 0, false, false), api.clone()));

        let pending = {
            let feedback = feedback.clone();
            tokio::spawn(async move { feedback.like().await })
        };
        while api.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        feedback.detach();
        gate.notify_one();

        assert!(matches!(pending.await.unwrap(), MutationOutcome::Stale));
        assert_eq!(feedback.state().await, state(1, 0, true, false));
        assert!(matches!(feedback.like().await, MutationOutcome::Stale));
    }

    #[tokio::test]
    async fn test_interleaved_clicks_never_hold_both_votes() {
        let api = Arc::new(MockFeedbackApi::default());
        let feedback = PostFeedback::new("p6", state(5, 5, false, false), api);

        for direction in [
            FeedbackDirection::Dislike,
            FeedbackDirection::Like,
            FeedbackDirection::Like,
            FeedbackDirection::Dislike,
            FeedbackDirection::Like,
        ] {
            feedback.submit_feedback(direction).await;
            let current = feedback.state().await;
            assert!(!(current.viewer_has_liked && current.viewer_has_disliked));
        }
    }

    mod over_http {
        use super::*;
        use mindful_core::config::ApiConfig;
        use mindful_infrastructure::{ApiClient, HttpPostApi, OriginStorage};
        use serde_json::json;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn http_api(server: &MockServer) -> Arc<HttpPostApi> {
            let config = ApiConfig {
                base_url: server.uri(),
                request_timeout_secs: None,
            };
            let tab = OriginStorage::new().open_tab();
            Arc::new(HttpPostApi::new(ApiClient::new(&config, Arc::new(tab)).unwrap()))
        }

        #[tokio::test]
        async fn test_like_after_dislike_adopts_server_body() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/posts/p1/like"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "qualidade": 4,
                    "naoGostou": 0,
                    "hasLiked": true,
                    "hasDisliked": false
                })))
                .expect(1)
                .mount(&server)
                .await;

            let feedback = PostFeedback::new("p1", state(3, 1, false, true), http_api(&server));

            assert!(feedback.like().await.is_applied());
            assert_eq!(feedback.state().await, state(4, 0, true, false));
        }

        #[tokio::test]
        async fn test_server_error_restores_every_field() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/posts/p1/like"))
                .respond_with(
                    ResponseTemplate::new(500).set_body_json(json!({"message": "falhou"})),
                )
                .expect(1)
                .mount(&server)
                .await;

            let feedback = PostFeedback::new("p1", state(3, 1, false, true), http_api(&server));

            let outcome = feedback.like().await;

            assert!(matches!(outcome, MutationOutcome::RolledBack(_)));
            assert_eq!(feedback.state().await, state(3, 1, false, true));
            assert!(!feedback.is_in_flight());
        }
    }
}
