//! Read paths with a fallback instead of an error.
//!
//! Lists, community pages and stats are display-only: a failed fetch is
//! logged and renders as an empty list or as missing stats. Writes
//! (joining, creating) still return their error to the caller.

use std::sync::Arc;

use mindful_core::community::{CommunitiesApi, Community, CommunityDetail, NewCommunity};
use mindful_core::error::Result;
use mindful_core::post::{Post, PostsApi};
use mindful_core::stats::{StatsApi, ViewerInsights, ViewerStats, WeeklyActivity};

/// Feeds, communities and the viewer's numbers.
#[derive(Clone)]
pub struct Overview {
    posts: Arc<dyn PostsApi>,
    communities: Arc<dyn CommunitiesApi>,
    stats: Arc<dyn StatsApi>,
}

impl Overview {
    pub fn new(
        posts: Arc<dyn PostsApi>,
        communities: Arc<dyn CommunitiesApi>,
        stats: Arc<dyn StatsApi>,
    ) -> Self {
        Self {
            posts,
            communities,
            stats,
        }
    }

    pub async fn feed(&self) -> Vec<Post> {
        or_empty("feed", self.posts.list_posts().await)
    }

    pub async fn my_posts(&self) -> Vec<Post> {
        or_empty("my posts", self.posts.list_my_posts().await)
    }

    pub async fn communities(&self) -> Vec<Community> {
        or_empty("communities", self.communities.list_communities().await)
    }

    pub async fn community(&self, id: &str) -> Option<CommunityDetail> {
        or_none("community", self.communities.get_community(id).await)
    }

    pub async fn community_posts(&self, id: &str) -> Vec<Post> {
        or_empty("community posts", self.communities.list_community_posts(id).await)
    }

    pub async fn join_community(&self, id: &str) -> Result<()> {
        self.communities.join_community(id).await
    }

    pub async fn create_community(&self, community: &NewCommunity) -> Result<Community> {
        self.communities.create_community(community).await
    }

    pub async fn stats(&self) -> Option<ViewerStats> {
        or_none("stats", self.stats.my_stats().await)
    }

    pub async fn insights(&self) -> Option<ViewerInsights> {
        or_none("insights", self.stats.my_insights().await)
    }

    pub async fn weekly_activity(&self) -> Vec<WeeklyActivity> {
        or_empty("weekly activity", self.stats.my_weekly_activity().await)
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Vec<T> {
    or_none(what, result).unwrap_or_default()
}

fn or_none<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("[Overview] Failed to load {}: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindful_core::error::MindfulError;
    use mindful_core::post::NewPost;

    /// Every call fails the same way.
    struct DownApi;

    fn down<T>() -> Result<T> {
        Err(MindfulError::network("connection refused"))
    }

    #[async_trait]
    impl PostsApi for DownApi {
        async fn list_posts(&self) -> Result<Vec<Post>> {
            down()
        }

        async fn list_my_posts(&self) -> Result<Vec<Post>> {
            down()
        }

        async fn create_post(&self, _post: &NewPost) -> Result<Post> {
            down()
        }
    }

    #[async_trait]
    impl CommunitiesApi for DownApi {
        async fn list_communities(&self) -> Result<Vec<Community>> {
            down()
        }

        async fn get_community(&self, _id: &str) -> Result<CommunityDetail> {
            down()
        }

        async fn join_community(&self, _id: &str) -> Result<()> {
            down()
        }

        async fn create_community(&self, _community: &NewCommunity) -> Result<Community> {
            down()
        }

        async fn list_community_posts(&self, _id: &str) -> Result<Vec<Post>> {
            down()
        }

        async fn create_community_post(&self, _id: &str, _content: &str) -> Result<Post> {
            down()
        }
    }

    #[async_trait]
    impl StatsApi for DownApi {
        async fn my_stats(&self) -> Result<ViewerStats> {
            down()
        }

        async fn my_insights(&self) -> Result<ViewerInsights> {
            down()
        }

        async fn my_weekly_activity(&self) -> Result<Vec<WeeklyActivity>> {
            down()
        }
    }

    /// Stats only; the other collaborators are down.
    struct StatsOnly;

    #[async_trait]
    impl StatsApi for StatsOnly {
        async fn my_stats(&self) -> Result<ViewerStats> {
            Ok(ViewerStats {
                total_posts: 2,
                total_communities: 1,
                consecutive_days_streak: 5,
            })
        }

        async fn my_insights(&self) -> Result<ViewerInsights> {
            Ok(ViewerInsights::default())
        }

        async fn my_weekly_activity(&self) -> Result<Vec<WeeklyActivity>> {
            Ok(vec![WeeklyActivity {
                day: "Segunda".to_string(),
                posts: 2,
            }])
        }
    }

    #[tokio::test]
    async fn test_failed_reads_fall_back() {
        let api = Arc::new(DownApi);
        let overview = Overview::new(api.clone(), api.clone(), api);

        assert!(overview.feed().await.is_empty());
        assert!(overview.my_posts().await.is_empty());
        assert!(overview.communities().await.is_empty());
        assert!(overview.community("1").await.is_none());
        assert!(overview.community_posts("1").await.is_empty());
        assert!(overview.stats().await.is_none());
        assert!(overview.insights().await.is_none());
        assert!(overview.weekly_activity().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_writes_are_returned() {
        let api = Arc::new(DownApi);
        let overview = Overview::new(api.clone(), api.clone(), api);

        assert!(overview.join_community("1").await.is_err());
        let community = NewCommunity::from_form("Leitura", "", &[]).unwrap();
        assert!(overview.create_community(&community).await.is_err());
    }

    #[tokio::test]
    async fn test_successful_reads_pass_through() {
        let down = Arc::new(DownApi);
        let overview = Overview::new(down.clone(), down, Arc::new(StatsOnly));

        assert_eq!(overview.stats().await.unwrap().consecutive_days_streak, 5);
        assert_eq!(overview.insights().await, Some(ViewerInsights::default()));
        assert_eq!(overview.weekly_activity().await[0].posts, 2);
    }
}
