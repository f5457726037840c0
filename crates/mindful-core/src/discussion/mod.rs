//! Discussion (threaded reply) domain module.

mod api;
mod model;

pub use api::DiscussionApi;
pub use model::{NewReply, Reply};
