//! Variant management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use twill_core::VariantId;

use crate::api::types::{LowStockAlert, ProductVariant, VariantPayload, VariantStockUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

fn validate_variant(payload: &VariantPayload) -> Result<()> {
    if payload.size.trim().is_empty() {
        return Err(AppError::Validation("size is required".to_string()));
    }
    if payload.color.trim().is_empty() {
        return Err(AppError::Validation("color is required".to_string()));
    }
    if payload.stock < 0 {
        return Err(AppError::Validation("stock cannot be negative".to_string()));
    }
    if payload.min_stock < 0 {
        return Err(AppError::Validation(
            "minStock cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Create a variant for a product.
pub async fn create(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<VariantPayload>,
) -> Result<Json<ProductVariant>> {
    if payload.product_id.is_none() {
        return Err(AppError::Validation("productId is required".to_string()));
    }
    validate_variant(&payload)?;

    let created = state
        .backoffice()
        .with_token(&auth.token)
        .create_variant(&payload)
        .await?;
    Ok(Json(created))
}

/// Update a variant.
pub async fn update(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<VariantPayload>,
) -> Result<Json<ProductVariant>> {
    validate_variant(&payload)?;

    let updated = state
        .backoffice()
        .with_token(&auth.token)
        .update_variant(VariantId::new(id), &payload)
        .await?;
    Ok(Json(updated))
}

/// Patch a variant's stock levels directly.
pub async fn update_stock(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<VariantStockUpdate>,
) -> Result<Json<ProductVariant>> {
    if update.stock < 0 {
        return Err(AppError::Validation("stock cannot be negative".to_string()));
    }
    if let Some(min_stock) = update.min_stock
        && min_stock < 0
    {
        return Err(AppError::Validation(
            "minStock cannot be negative".to_string(),
        ));
    }

    let updated = state
        .backoffice()
        .with_token(&auth.token)
        .update_variant_stock(VariantId::new(id), update)
        .await?;
    Ok(Json(updated))
}

/// Delete a variant.
pub async fn delete(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .delete_variant(VariantId::new(id))
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "Variant deleted".to_string())
    })))
}

/// Current low-stock alerts.
pub async fn alerts(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<LowStockAlert>>> {
    let alerts = state
        .backoffice()
        .with_token(&auth.token)
        .low_stock_alerts()
        .await?;
    Ok(Json(alerts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> VariantPayload {
        VariantPayload {
            product_id: Some(twill_core::ProductId::new(1)),
            size: "M".to_string(),
            color: "White".to_string(),
            stock: 0,
            min_stock: 5,
        }
    }

    #[test]
    fn test_validate_variant_ok() {
        assert!(validate_variant(&payload()).is_ok());
    }

    #[test]
    fn test_validate_variant_rejects_blank_size() {
        let mut p = payload();
        p.size = " ".to_string();
        assert!(validate_variant(&p).is_err());
    }

    #[test]
    fn test_validate_variant_rejects_negative_stock() {
        let mut p = payload();
        p.stock = -1;
        assert!(validate_variant(&p).is_err());
    }
}
