use serde::{Deserialize, Serialize};

/// Profile header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerStats {
    pub total_posts: u32,
    pub total_communities: u32,
    pub consecutive_days_streak: u32,
}

/// Longer-term engagement summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerInsights {
    pub total_posts: u32,
    pub total_discussions: u32,
    pub communities_joined: u32,
    pub average_read_time_minutes: f64,
    pub feedbacks_given: Option<u32>,
    /// Average quality of the feedback given, `0.0..=100.0`.
    pub feedback_quality_avg: Option<f64>,
    pub discussions_started: Option<u32>,
}

/// One bar of the weekly activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivity {
    /// Either a weekday name or an ISO date, as the server labels it.
    pub day: String,
    pub posts: u32,
}
