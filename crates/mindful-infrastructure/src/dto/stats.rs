//! Viewer statistics DTOs.

use mindful_core::stats::{ViewerInsights, ViewerStats, WeeklyActivity};
use serde::Deserialize;
use serde_json::Value;

use super::value::{count, counter, non_negative, number};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerStatsDto {
    #[serde(default)]
    pub total_posts: Option<Value>,
    #[serde(default)]
    pub total_communities: Option<Value>,
    #[serde(default)]
    pub consecutive_days_streak: Option<Value>,
}

impl From<ViewerStatsDto> for ViewerStats {
    fn from(dto: ViewerStatsDto) -> Self {
        ViewerStats {
            total_posts: counter(dto.total_posts.as_ref()),
            total_communities: counter(dto.total_communities.as_ref()),
            consecutive_days_streak: counter(dto.consecutive_days_streak.as_ref()),
        }
    }
}

/// `averageReadTime` is in minutes and may be fractional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerInsightsDto {
    #[serde(default)]
    pub total_posts: Option<Value>,
    #[serde(default)]
    pub total_discussions: Option<Value>,
    #[serde(default)]
    pub communities_joined: Option<Value>,
    #[serde(default)]
    pub average_read_time: Option<Value>,
    #[serde(default)]
    pub feedbacks_given: Option<Value>,
    #[serde(default)]
    pub feedback_quality_avg: Option<Value>,
    #[serde(default)]
    pub discussions_started: Option<Value>,
}

impl From<ViewerInsightsDto> for ViewerInsights {
    fn from(dto: ViewerInsightsDto) -> Self {
        let optional = |value: Option<Value>| count(value.as_ref()).map(|n| non_negative(Some(n)));
        ViewerInsights {
            total_posts: counter(dto.total_posts.as_ref()),
            total_discussions: counter(dto.total_discussions.as_ref()),
            communities_joined: counter(dto.communities_joined.as_ref()),
            average_read_time_minutes: number(dto.average_read_time.as_ref()).unwrap_or(0.0),
            feedbacks_given: optional(dto.feedbacks_given),
            feedback_quality_avg: number(dto.feedback_quality_avg.as_ref())
                .map(|avg| avg.clamp(0.0, 100.0)),
            discussions_started: optional(dto.discussions_started),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyActivityDto {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub posts: Option<Value>,
}

impl From<WeeklyActivityDto> for WeeklyActivity {
    fn from(dto: WeeklyActivityDto) -> Self {
        WeeklyActivity {
            day: dto.day.unwrap_or_default(),
            posts: counter(dto.posts.as_ref()),
        }
    }
}
