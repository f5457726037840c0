//! Community domain module.

mod api;
mod model;

pub use api::CommunitiesApi;
pub use model::{Community, CommunityDetail, CommunityDiscussion, NewCommunity};
