//! Authentication service.
//!
//! Orchestrates backend login/logout and the session-stored token state.
//! Tokens live for seven days from login; validity is checked on every
//! access so an expired token never reaches the backend.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tower_sessions::Session;

use crate::api::BackofficeClient;
use crate::models::{AuthState, CurrentUser, session_keys};

/// Token lifetime granted at login: seven days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Sessions with less than this long to live report `expiring_soon`.
const EXPIRY_WARNING_HOURS: i64 = 24;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected the credentials or the token.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No valid authentication state in the session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Backend call failure other than an auth rejection.
    #[error(transparent)]
    Backend(crate::api::BackofficeError),
}

/// Expiry information for the current session, mirroring what the login
/// screen shows as a session countdown.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub valid: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub seconds_left: Option<i64>,
    pub expiring_soon: bool,
}

/// Whether a client-side token expiration is still in the future.
#[must_use]
pub fn is_token_valid(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < expires_at
}

/// Compute the expiration granted to a token issued at `now`.
#[must_use]
pub fn expiration_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(TOKEN_TTL_DAYS)
}

/// Summarize a token's expiry state at `now`.
#[must_use]
pub fn session_info(auth: Option<&AuthState>, now: DateTime<Utc>) -> SessionInfo {
    let Some(auth) = auth else {
        return SessionInfo {
            valid: false,
            expires_at: None,
            seconds_left: None,
            expiring_soon: false,
        };
    };

    if !is_token_valid(auth.token_expiration, now) {
        return SessionInfo {
            valid: false,
            expires_at: Some(auth.token_expiration),
            seconds_left: None,
            expiring_soon: false,
        };
    }

    let left = auth.token_expiration - now;
    SessionInfo {
        valid: true,
        expires_at: Some(auth.token_expiration),
        seconds_left: Some(left.num_seconds()),
        expiring_soon: left < Duration::hours(EXPIRY_WARNING_HOURS),
    }
}

/// Log in against the backend and store the auth state in the session.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on rejected credentials, or a
/// backend/session error otherwise.
pub async fn login(
    client: &BackofficeClient,
    session: &Session,
    username: &str,
    password: &str,
) -> Result<AuthState, AuthError> {
    let response = client.login(username, password).await.map_err(|e| match e {
        crate::api::BackofficeError::AuthExpired(_) => AuthError::InvalidCredentials,
        other => AuthError::Backend(other),
    })?;

    let user = CurrentUser {
        id: response.user.id,
        username: response.user.username,
        name: response.user.name,
        email: response.user.email,
        role: response.user.role,
    };

    let auth = AuthState {
        token: response.token,
        user,
        token_expiration: expiration_from(Utc::now()),
    };

    session.insert(session_keys::AUTH, &auth).await?;

    tracing::info!(
        user_id = %auth.user.id,
        role = %auth.user.role,
        expires_at = %auth.token_expiration,
        "Login successful"
    );

    Ok(auth)
}

/// Read the current auth state, clearing it if expired.
///
/// # Errors
///
/// Returns `AuthError::Session` if the session store fails.
pub async fn current(session: &Session) -> Result<Option<AuthState>, AuthError> {
    let Some(auth) = session.get::<AuthState>(session_keys::AUTH).await? else {
        return Ok(None);
    };

    if is_token_valid(auth.token_expiration, Utc::now()) {
        Ok(Some(auth))
    } else {
        tracing::info!(user_id = %auth.user.id, "Token expired, clearing auth state");
        session.remove::<AuthState>(session_keys::AUTH).await?;
        Ok(None)
    }
}

/// Log out: best-effort backend token invalidation, then clear the session.
///
/// # Errors
///
/// Returns `AuthError::Session` if the session store fails.
pub async fn logout(client: &BackofficeClient, session: &Session) -> Result<(), AuthError> {
    if let Ok(Some(auth)) = session.get::<AuthState>(session_keys::AUTH).await {
        // The local state is cleared regardless of what the backend says
        if let Err(e) = client.with_token(&auth.token).logout().await {
            tracing::warn!(error = %e, "Backend logout failed");
        }
    }

    session.remove::<AuthState>(session_keys::AUTH).await?;
    Ok(())
}

/// Drop the session's auth state without touching the backend.
///
/// Used when the backend has already rejected the token.
///
/// # Errors
///
/// Returns `AuthError::Session` if the session store fails.
pub async fn clear(session: &Session) -> Result<(), AuthError> {
    session.remove::<AuthState>(session_keys::AUTH).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use twill_core::{Email, UserId, UserRole};

    use super::*;

    fn auth_state(expires_at: DateTime<Utc>) -> AuthState {
        AuthState {
            token: "tok".to_string(),
            user: CurrentUser {
                id: UserId::new(1),
                username: "admin".to_string(),
                name: "Store Admin".to_string(),
                email: Email::parse("admin@twill.example").expect("valid email"),
                role: UserRole::Admin,
            },
            token_expiration: expires_at,
        }
    }

    #[test]
    fn test_token_validity() {
        let now = Utc::now();
        assert!(is_token_valid(now + Duration::minutes(1), now));
        assert!(!is_token_valid(now - Duration::minutes(1), now));
        assert!(!is_token_valid(now, now));
    }

    #[test]
    fn test_expiration_is_seven_days_out() {
        let now = Utc::now();
        assert_eq!(expiration_from(now) - now, Duration::days(7));
    }

    #[test]
    fn test_session_info_absent() {
        let info = session_info(None, Utc::now());
        assert!(!info.valid);
        assert!(info.expires_at.is_none());
    }

    #[test]
    fn test_session_info_expired() {
        let now = Utc::now();
        let auth = auth_state(now - Duration::hours(1));
        let info = session_info(Some(&auth), now);
        assert!(!info.valid);
        assert!(info.expires_at.is_some());
        assert!(info.seconds_left.is_none());
    }

    #[test]
    fn test_session_info_expiring_soon_boundary() {
        let now = Utc::now();

        let auth = auth_state(now + Duration::hours(23));
        let info = session_info(Some(&auth), now);
        assert!(info.valid);
        assert!(info.expiring_soon);

        let auth = auth_state(now + Duration::hours(25));
        let info = session_info(Some(&auth), now);
        assert!(info.valid);
        assert!(!info.expiring_soon);
    }

    #[test]
    fn test_session_info_seconds_left() {
        let now = Utc::now();
        let auth = auth_state(now + Duration::days(2));
        let info = session_info(Some(&auth), now);
        assert_eq!(info.seconds_left, Some(2 * 24 * 60 * 60));
    }
}
