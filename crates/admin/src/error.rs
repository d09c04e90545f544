//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::api::BackofficeError;
use crate::services::auth::AuthError;

/// Application-level error type for the admin service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Retail backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackofficeError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; expected client errors are not events
        let is_server_error = matches!(
            self,
            Self::Internal(_)
                | Self::Backend(
                    BackofficeError::Http(_)
                        | BackofficeError::Status { .. }
                        | BackofficeError::Parse(_)
                )
                | Self::Auth(AuthError::Session(_) | AuthError::Backend(_))
        );
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Backend(err) => match err {
                BackofficeError::AuthExpired(_) => StatusCode::UNAUTHORIZED,
                BackofficeError::NotFound(_) => StatusCode::NOT_FOUND,
                BackofficeError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                BackofficeError::Rejected(_) => StatusCode::BAD_REQUEST,
                BackofficeError::Http(_)
                | BackofficeError::Status { .. }
                | BackofficeError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Session(_) | AuthError::Backend(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Backend(err) => match err {
                BackofficeError::AuthExpired(_) => {
                    "Session expired, please sign in again".to_string()
                }
                BackofficeError::NotFound(msg) | BackofficeError::Rejected(msg) => msg.clone(),
                BackofficeError::RateLimited(_) => "Too many requests".to_string(),
                _ => "External service error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::NotAuthenticated => {
                    "Session expired, please sign in again".to_string()
                }
                _ => "Authentication error".to_string(),
            },
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            get_status(AppError::Validation("quantity must be at least 1".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_expired_maps_to_401() {
        assert_eq!(
            get_status(AppError::Backend(BackofficeError::AuthExpired("x".into()))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_backend_rejection_maps_to_400() {
        assert_eq!(
            get_status(AppError::Backend(BackofficeError::Rejected(
                "insufficient stock".into()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_transport_errors_map_to_502() {
        assert_eq!(
            get_status(AppError::Backend(BackofficeError::Status {
                status: 500,
                message: "x".into()
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
