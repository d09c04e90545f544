//! Category management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use twill_core::CategoryId;

use crate::api::types::{CategoryPayload, ProductCategory};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

fn validate_category(payload: &CategoryPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("slug is required".to_string()));
    }
    Ok(())
}

/// List all categories.
pub async fn index(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductCategory>>> {
    let categories = state
        .backoffice()
        .with_token(&auth.token)
        .list_categories()
        .await?;
    Ok(Json(categories))
}

/// Create a category.
pub async fn create(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<ProductCategory>> {
    validate_category(&payload)?;

    let created = state
        .backoffice()
        .with_token(&auth.token)
        .create_category(&payload)
        .await?;
    Ok(Json(created))
}

/// Update a category.
pub async fn update(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<ProductCategory>> {
    validate_category(&payload)?;

    let updated = state
        .backoffice()
        .with_token(&auth.token)
        .update_category(CategoryId::new(id), &payload)
        .await?;
    Ok(Json(updated))
}

/// Delete a category.
pub async fn delete(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .delete_category(CategoryId::new(id))
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "Category deleted".to_string())
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_requires_name_and_slug() {
        let payload = CategoryPayload {
            name: String::new(),
            slug: "shirts".to_string(),
            description: None,
            parent_id: None,
        };
        assert!(validate_category(&payload).is_err());

        let payload = CategoryPayload {
            name: "Shirts".to_string(),
            slug: " ".to_string(),
            description: None,
            parent_id: None,
        };
        assert!(validate_category(&payload).is_err());

        let payload = CategoryPayload {
            name: "Shirts".to_string(),
            slug: "shirts".to_string(),
            description: Some("Button-ups".to_string()),
            parent_id: None,
        };
        assert!(validate_category(&payload).is_ok());
    }
}
