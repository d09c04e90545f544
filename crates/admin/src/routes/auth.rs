//! Authentication route handlers.

use axum::{
    Json,
    extract::State,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::api::types::{LoginRequest, ProfileUpdate, User};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::auth;
use crate::state::AppState;

/// Successful login payload: who signed in and how long the session lasts.
/// The bearer token itself never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub user: CurrentUser,
    pub token_expiration: DateTime<Utc>,
}

/// Sign in against the backend and establish a session.
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginView>> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let auth = auth::login(state.backoffice(), &session, &body.username, &body.password).await?;

    Ok(Json(LoginView {
        user: auth.user,
        token_expiration: auth.token_expiration,
    }))
}

/// Sign out: invalidate the backend token (best effort) and clear the session.
pub async fn logout(session: Session, State(state): State<AppState>) -> Result<Json<Value>> {
    auth::logout(state.backoffice(), &session).await?;
    Ok(Json(json!({ "success": true, "message": "Signed out" })))
}

/// Report the session's expiry state.
pub async fn session_info(session: Session) -> Result<Json<auth::SessionInfo>> {
    let current = auth::current(&session).await?;
    Ok(Json(auth::session_info(current.as_ref(), Utc::now())))
}

/// Fetch the signed-in operator's profile from the backend.
pub async fn profile(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<User>> {
    let user = state.backoffice().with_token(&auth.token).profile().await?;
    Ok(Json(user))
}

/// Update the signed-in operator's profile.
pub async fn update_profile(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    if let Some(email) = &update.email {
        twill_core::Email::parse(email.as_str())
            .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    }

    let user = state
        .backoffice()
        .with_token(&auth.token)
        .update_profile(&update)
        .await?;
    Ok(Json(user))
}
