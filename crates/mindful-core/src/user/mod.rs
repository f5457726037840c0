//! Viewer identity and preferences.
//!
//! # Module Structure
//!
//! - `model`: Login payloads and authentication events
//! - `service`: The authentication collaborator trait (`AuthApi`)
//! - `preferences`: Limit-related preference flags and their repository

mod model;
mod preferences;
mod service;

pub use model::{AuthEvent, Credentials, LoginResponse};
pub use preferences::{LimitPreferences, PreferencesRepository};
pub use service::AuthApi;
