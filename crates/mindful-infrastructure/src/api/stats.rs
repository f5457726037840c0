//! Viewer statistics endpoints.

use async_trait::async_trait;
use mindful_core::error::Result;
use mindful_core::stats::{StatsApi, ViewerInsights, ViewerStats, WeeklyActivity};

use super::client::ApiClient;
use crate::dto::{ViewerInsightsDto, ViewerStatsDto, WeeklyActivityDto};

/// HTTP implementation of [`StatsApi`].
#[derive(Clone)]
pub struct HttpStatsApi {
    client: ApiClient,
}

impl HttpStatsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatsApi for HttpStatsApi {
    async fn my_stats(&self) -> Result<ViewerStats> {
        let stats: ViewerStatsDto = self.client.get_json("/me/stats").await?;
        Ok(stats.into())
    }

    async fn my_insights(&self) -> Result<ViewerInsights> {
        let insights: ViewerInsightsDto = self.client.get_json("/me/insights").await?;
        Ok(insights.into())
    }

    async fn my_weekly_activity(&self) -> Result<Vec<WeeklyActivity>> {
        let days: Option<Vec<WeeklyActivityDto>> =
            self.client.get_json("/me/activity/weekly").await?;
        Ok(days
            .unwrap_or_default()
            .into_iter()
            .map(WeeklyActivity::from)
            .collect())
    }
}
