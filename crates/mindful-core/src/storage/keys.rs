//! Well-known storage keys shared with other tabs of the same origin.

/// JSON blob holding the session clock state.
pub const SESSION_STATE: &str = "timeTrackingData";

/// Bearer token attached to every API request.
pub const ACCESS_TOKEN: &str = "accessToken";

/// Viewer id sent as the `idUsuario` header.
pub const USER_ID: &str = "userId";

/// `"true"`/`"false"`: show an alert when the daily limit is reached.
pub const TIME_ALERT_ENABLED: &str = "timeAlertEnabled";

/// `"true"`/`"false"`: log out automatically when the daily limit is reached.
pub const AUTO_LOGOUT_ENABLED: &str = "autoLogoutEnabled";

/// ISO date of the last automatic logout.
pub const AUTO_LOGGED_OUT_AT: &str = "autoLoggedOutAt";
