//! Wire Data Transfer Objects (DTOs) for the HTTP API.
//!
//! The server is loose about shapes: ids may be strings or numbers,
//! authors and communities may be plain names or objects, and counters
//! may be missing. These DTOs accept all of that and convert into the
//! strict domain models. They are private to the infrastructure layer.

mod community;
mod discussion;
mod feedback;
mod post;
mod stats;
mod value;

pub use community::{CommunityDetailDto, CommunityDiscussionDto, CommunityDto};
pub use discussion::DiscussionDto;
pub use feedback::FeedbackDto;
pub use post::PostDto;
pub use stats::{ViewerInsightsDto, ViewerStatsDto, WeeklyActivityDto};
