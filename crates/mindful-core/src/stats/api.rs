use async_trait::async_trait;

use super::model::{ViewerInsights, ViewerStats, WeeklyActivity};
use crate::error::Result;

/// Remote collaborator for the viewer's own numbers.
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn my_stats(&self) -> Result<ViewerStats>;

    async fn my_insights(&self) -> Result<ViewerInsights>;

    /// Posts per day for the current week, in server order.
    async fn my_weekly_activity(&self) -> Result<Vec<WeeklyActivity>>;
}
