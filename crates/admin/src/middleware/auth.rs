//! Authentication middleware and extractors.
//!
//! Route handlers take [`RequireAuth`] (any operator) or [`RequireAdmin`]
//! (Admin role). Both check the session's client-side token expiration so an
//! expired token never reaches the backend.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use twill_core::UserRole;

use crate::models::AuthState;
use crate::services::auth;

/// Extractor that requires an authenticated operator.
///
/// Rejects with 401 and a `loginRequired` hint when the session holds no
/// valid auth state.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(auth): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user.name)
/// }
/// ```
pub struct RequireAuth(pub AuthState);

/// Rejection for [`RequireAuth`].
pub enum AuthRejection {
    /// No valid auth state in the session.
    Unauthorized,
    /// Session store failure.
    SessionError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "message": "Session expired, please sign in again",
                    "loginRequired": true
                })),
            )
                .into_response(),
            Self::SessionError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        // Reads through the auth service so expired tokens are cleared
        let auth = auth::current(session)
            .await
            .map_err(|_| AuthRejection::SessionError)?
            .ok_or(AuthRejection::Unauthorized)?;

        Ok(Self(auth))
    }
}

/// Extractor that requires the Admin role.
///
/// User management is Admin-only; managers get 403.
pub struct RequireAdmin(pub AuthState);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// No valid auth state in the session.
    Unauthorized,
    /// Authenticated, but not an admin.
    Forbidden,
    /// Session store failure.
    SessionError,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => AuthRejection::Unauthorized.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "success": false,
                    "message": "Only admins can access this resource"
                })),
            )
                .into_response(),
            Self::SessionError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthorized)?;

        let auth = auth::current(session)
            .await
            .map_err(|_| AdminRejection::SessionError)?
            .ok_or(AdminRejection::Unauthorized)?;

        if auth.user.role != UserRole::Admin {
            return Err(AdminRejection::Forbidden);
        }

        Ok(Self(auth))
    }
}

/// Middleware that drops the session's auth state whenever a response goes
/// out as 401.
///
/// A 401 means either the local expiry check failed or the backend rejected
/// the token; in both cases the stored state is useless and the operator
/// must sign in again.
pub async fn clear_auth_on_unauthorized(request: Request, next: Next) -> Response {
    let session = request.extensions().get::<Session>().cloned();

    let response = next.run(request).await;

    if response.status() == StatusCode::UNAUTHORIZED
        && let Some(session) = session
        && let Err(e) = auth::clear(&session).await
    {
        tracing::debug!(error = %e, "Failed to clear auth state after 401");
    }

    response
}
