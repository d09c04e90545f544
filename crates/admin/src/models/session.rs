//! Session-stored authentication state.
//!
//! The back office never persists anything locally; the session holds the
//! backend's bearer token, the account it belongs to, and a client-side
//! expiration timestamp, under the single `auth` key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use twill_core::{Email, UserId, UserRole};

/// Minimal identity of the logged-in operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Permission level.
    pub role: UserRole,
}

/// Everything the session stores about an authenticated operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthState {
    /// Bearer token for the retail backend.
    pub token: String,
    /// The account the token belongs to.
    pub user: CurrentUser,
    /// Client-side token expiration; checked before every privileged call.
    pub token_expiration: DateTime<Utc>,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for the stored [`super::AuthState`].
    pub const AUTH: &str = "auth";
}
