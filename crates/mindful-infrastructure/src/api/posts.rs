//! Post, feedback and discussion endpoints.

use async_trait::async_trait;
use mindful_core::discussion::{DiscussionApi, NewReply, Reply};
use mindful_core::error::Result;
use mindful_core::feedback::{FeedbackAction, FeedbackResponse, PostFeedbackApi};
use mindful_core::post::{NewPost, Post, PostsApi};

use super::client::ApiClient;
use crate::dto::{DiscussionDto, FeedbackDto, PostDto};

/// HTTP implementation of the post-related collaborators.
#[derive(Clone)]
pub struct HttpPostApi {
    client: ApiClient,
}

impl HttpPostApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn list(&self, path: &str) -> Result<Vec<Post>> {
        let posts: Option<Vec<PostDto>> = self.client.get_json(path).await?;
        Ok(posts
            .unwrap_or_default()
            .into_iter()
            .map(Post::from)
            .collect())
    }
}

#[async_trait]
impl PostFeedbackApi for HttpPostApi {
    async fn send_feedback(
        &self,
        post_id: &str,
        action: FeedbackAction,
    ) -> Result<FeedbackResponse> {
        let path = format!("/posts/{}/{}", post_id, action.path_segment());
        tracing::debug!("[HttpPostApi] POST {}", path);
        let body: Option<FeedbackDto> = self.client.post_empty(&path).await?;
        // An empty body confirms the action without authoritative fields.
        Ok(body.map(FeedbackResponse::from).unwrap_or_default())
    }
}

#[async_trait]
impl DiscussionApi for HttpPostApi {
    async fn list_replies(&self, post_id: &str) -> Result<Vec<Reply>> {
        let replies: Option<Vec<DiscussionDto>> = self
            .client
            .get_json(&format!("/posts/{}/discussions", post_id))
            .await?;
        Ok(replies
            .unwrap_or_default()
            .into_iter()
            .map(Reply::from)
            .collect())
    }

    async fn create_reply(&self, post_id: &str, reply: &NewReply) -> Result<Reply> {
        let created: DiscussionDto = self
            .client
            .post_json(&format!("/posts/{}/discussions", post_id), reply)
            .await?;
        Ok(created.into())
    }
}

#[async_trait]
impl PostsApi for HttpPostApi {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.list("/posts").await
    }

    async fn list_my_posts(&self) -> Result<Vec<Post>> {
        self.list("/posts/me").await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let created: PostDto = self.client.post_json("/posts", post).await?;
        Ok(created.into())
    }
}
