use async_trait::async_trait;

use super::model::{NewPost, Post};
use crate::error::Result;

/// Remote collaborator for feeds.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// The general (randomized) feed.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Posts written by the viewer.
    async fn list_my_posts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, post: &NewPost) -> Result<Post>;
}
