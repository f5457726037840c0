use async_trait::async_trait;

use super::model::{Community, CommunityDetail, NewCommunity};
use crate::error::Result;
use crate::post::Post;

/// Remote collaborator for communities and their feeds.
#[async_trait]
pub trait CommunitiesApi: Send + Sync {
    async fn list_communities(&self) -> Result<Vec<Community>>;

    /// Summary, membership and recent discussions of one community.
    async fn get_community(&self, id: &str) -> Result<CommunityDetail>;

    /// Joins the viewer to `id`. Joining twice is the server's concern.
    async fn join_community(&self, id: &str) -> Result<()>;

    async fn create_community(&self, community: &NewCommunity) -> Result<Community>;

    async fn list_community_posts(&self, id: &str) -> Result<Vec<Post>>;

    /// Publishes `content` in community `id`.
    ///
    /// # Arguments
    ///
    /// * `id` - Target community
    /// * `content` - Post text, already trimmed by the caller
    async fn create_community_post(&self, id: &str, content: &str) -> Result<Post>;
}
