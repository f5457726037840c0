//! Viewer statistics domain module.

mod api;
mod model;

pub use api::StatsApi;
pub use model::{ViewerInsights, ViewerStats, WeeklyActivity};
