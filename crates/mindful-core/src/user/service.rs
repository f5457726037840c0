use async_trait::async_trait;

use super::model::{Credentials, LoginResponse};
use crate::error::Result;

/// Authentication collaborator.
///
/// Implementations persist the token and viewer id on success so that
/// subsequent requests carry them.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn register(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Forgets the stored token. Never fails for a viewer who is already
    /// logged out.
    async fn logout(&self) -> Result<()>;
}
