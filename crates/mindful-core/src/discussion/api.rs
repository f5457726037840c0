use async_trait::async_trait;

use super::model::{NewReply, Reply};
use crate::error::Result;

/// Remote collaborator for post discussions.
#[async_trait]
pub trait DiscussionApi: Send + Sync {
    /// Lists the replies of `post_id`, in server order.
    async fn list_replies(&self, post_id: &str) -> Result<Vec<Reply>>;

    /// Creates a reply and returns it as stored by the server.
    async fn create_reply(&self, post_id: &str, reply: &NewReply) -> Result<Reply>;
}
