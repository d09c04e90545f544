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

use crate::api::RetailApiError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Retail backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] RetailApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; expected client errors are not events
        let is_server_error = matches!(
            self,
            Self::Backend(
                RetailApiError::Http(_) | RetailApiError::Status { .. } | RetailApiError::Parse(_)
            )
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
                RetailApiError::NotFound(_) => StatusCode::NOT_FOUND,
                RetailApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                RetailApiError::Rejected(_) => StatusCode::BAD_REQUEST,
                RetailApiError::Http(_)
                | RetailApiError::Status { .. }
                | RetailApiError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(err) => match err {
                RetailApiError::NotFound(msg) | RetailApiError::Rejected(msg) => msg.clone(),
                RetailApiError::RateLimited(_) => "Too many requests".to_string(),
                _ => "External service error".to_string(),
            },
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
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Backend(RetailApiError::NotFound("x".into()))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_backend_error_mapping() {
        assert_eq!(
            get_status(AppError::Backend(RetailApiError::RateLimited(2))),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            get_status(AppError::Backend(RetailApiError::Rejected("x".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Backend(RetailApiError::Status {
                status: 500,
                message: "x".into()
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
