use serde::{Deserialize, Serialize};

/// Email/password pair for login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: i64,
    pub email: String,
}

/// Session-level signals broadcast to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    /// The API answered 401; the host should route to the login entry
    /// point unless it is already there.
    SessionInvalidated,
    LoggedIn { user_id: i64 },
    LoggedOut,
}
