//! User management route handlers.
//!
//! Admin role required throughout. Operators cannot deactivate or delete
//! their own account; the backend enforces the same rule.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use twill_core::{Email, UserId};

use crate::api::types::{NewUser, PasswordChange, User, UserFilter, UserStats, UserUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::routes::ListView;
use crate::state::AppState;

/// Minimum password length for created accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// User listing with search.
pub async fn index(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<ListView<User>>> {
    let page = state
        .backoffice()
        .with_token(&auth.token)
        .list_users(&filter)
        .await?;
    Ok(Json(ListView::from(page)))
}

/// Single user detail.
pub async fn show(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>> {
    let user = state
        .backoffice()
        .with_token(&auth.token)
        .get_user(UserId::new(id))
        .await?;
    Ok(Json(user))
}

/// Create a user.
pub async fn create(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<User>> {
    if user.username.trim().is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if user.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    Email::parse(user.email.as_str())
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    validate_password(&user.password)?;

    let created = state
        .backoffice()
        .with_token(&auth.token)
        .create_user(&user)
        .await?;

    tracing::info!(user_id = %created.id, role = %created.role, "User created");

    Ok(Json(created))
}

/// Update a user.
pub async fn update(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>> {
    if let Some(email) = &update.email {
        Email::parse(email.as_str())
            .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    }

    let updated = state
        .backoffice()
        .with_token(&auth.token)
        .update_user(UserId::new(id), &update)
        .await?;
    Ok(Json(updated))
}

/// Change a user's password.
pub async fn change_password(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(change): Json<PasswordChange>,
) -> Result<Json<serde_json::Value>> {
    validate_password(&change.new_password)?;

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .change_password(UserId::new(id), &change)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "Password changed".to_string())
    })))
}

/// Toggle a user's active flag.
pub async fn toggle_status(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>> {
    let id = UserId::new(id);
    if id == auth.user.id {
        return Err(AppError::Validation(
            "cannot deactivate your own account".to_string(),
        ));
    }

    let user = state
        .backoffice()
        .with_token(&auth.token)
        .toggle_user_status(id)
        .await?;

    tracing::info!(user_id = %id, is_active = %user.is_active, "User status toggled");

    Ok(Json(user))
}

/// Delete a user.
pub async fn delete(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let id = UserId::new(id);
    if id == auth.user.id {
        return Err(AppError::Validation(
            "cannot delete your own account".to_string(),
        ));
    }

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .delete_user(id)
        .await?;

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "User deleted".to_string())
    })))
}

/// Aggregate user counts.
pub async fn stats(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<UserStats>> {
    let stats = state
        .backoffice()
        .with_token(&auth.token)
        .user_stats()
        .await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("hunter12").is_ok());
        assert!(validate_password("short").is_err());
    }
}
