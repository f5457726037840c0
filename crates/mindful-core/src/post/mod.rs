//! Post (reflection) domain module.

mod api;
mod model;

pub use api::PostsApi;
pub use model::{NewPost, Post};
