//! HTTP adapters for the Mindful API.
//!
//! # Module Structure
//!
//! - `client`: [`ApiClient`], credentials headers and 401 handling
//! - `posts`: [`HttpPostApi`] (feeds, feedback, discussions)
//! - `communities`: [`HttpCommunityApi`] (listing, detail, joining, community posts)
//! - `stats`: [`HttpStatsApi`] (the viewer's counters and weekly activity)
//! - `auth`: [`HttpAuthApi`] (login, registration, logout)

mod auth;
pub(crate) mod client;
mod communities;
mod posts;
mod stats;

pub use auth::HttpAuthApi;
pub use client::{ApiClient, USER_ID_HEADER};
pub use communities::HttpCommunityApi;
pub use posts::HttpPostApi;
pub use stats::HttpStatsApi;
