//! Community endpoints.

use async_trait::async_trait;
use mindful_core::community::{CommunitiesApi, Community, CommunityDetail, NewCommunity};
use mindful_core::error::Result;
use mindful_core::post::Post;
use serde_json::{Value, json};

use super::client::ApiClient;
use crate::dto::{CommunityDetailDto, CommunityDto, PostDto};

/// HTTP implementation of [`CommunitiesApi`].
#[derive(Clone)]
pub struct HttpCommunityApi {
    client: ApiClient,
}

impl HttpCommunityApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommunitiesApi for HttpCommunityApi {
    async fn list_communities(&self) -> Result<Vec<Community>> {
        let communities: Option<Vec<CommunityDto>> = self.client.get_json("/communities").await?;
        Ok(communities
            .unwrap_or_default()
            .into_iter()
            .map(Community::from)
            .collect())
    }

    async fn get_community(&self, id: &str) -> Result<CommunityDetail> {
        let detail: CommunityDetailDto = self
            .client
            .get_json(&format!("/communities/{}", id))
            .await?;
        Ok(detail.into())
    }

    async fn join_community(&self, id: &str) -> Result<()> {
        let _: Option<Value> = self
            .client
            .post_empty(&format!("/communities/{}/join", id))
            .await?;
        tracing::info!("[HttpCommunityApi] Joined community {}", id);
        Ok(())
    }

    async fn create_community(&self, community: &NewCommunity) -> Result<Community> {
        let created: CommunityDto = self.client.post_json("/communities", community).await?;
        let created = Community::from(created);
        tracing::info!("[HttpCommunityApi] Created community {}", created.id);
        Ok(created)
    }

    async fn list_community_posts(&self, id: &str) -> Result<Vec<Post>> {
        let posts: Option<Vec<PostDto>> = self
            .client
            .get_json(&format!("/communities/{}/posts", id))
            .await?;
        Ok(posts
            .unwrap_or_default()
            .into_iter()
            .map(Post::from)
            .collect())
    }

    async fn create_community_post(&self, id: &str, content: &str) -> Result<Post> {
        let created: PostDto = self
            .client
            .post_json(
                &format!("/communities/{}/posts", id),
                &json!({ "content": content }),
            )
            .await?;
        Ok(created.into())
    }
}
