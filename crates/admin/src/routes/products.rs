//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use rust_decimal::Decimal;
use twill_core::ProductId;

use crate::api::types::{NewProduct, Product, ProductFilter, ProductStatusUpdate, ProductUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::ListView;
use crate::state::AppState;

/// Validate the shared product fields.
fn validate_product_fields(
    sku: Option<&str>,
    name: Option<&str>,
    purchase_price: Option<Decimal>,
    sale_price: Option<Decimal>,
) -> Result<()> {
    if let Some(sku) = sku
        && sku.trim().is_empty()
    {
        return Err(AppError::Validation("sku is required".to_string()));
    }
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("name is required".to_string()));
    }
    for (label, price) in [("purchasePrice", purchase_price), ("salePrice", sale_price)] {
        if let Some(price) = price
            && price.is_sign_negative()
        {
            return Err(AppError::Validation(format!("{label} cannot be negative")));
        }
    }
    Ok(())
}

/// Product listing for the back office (includes inactive products).
pub async fn index(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ListView<Product>>> {
    let page = state
        .backoffice()
        .with_token(&auth.token)
        .list_products(&filter)
        .await?;
    Ok(Json(ListView::from(page)))
}

/// Single product detail.
pub async fn show(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = state
        .backoffice()
        .with_token(&auth.token)
        .get_product(ProductId::new(id))
        .await?;
    Ok(Json(product))
}

/// Create a product.
pub async fn create(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(product): Json<NewProduct>,
) -> Result<Json<Product>> {
    validate_product_fields(
        Some(&product.sku),
        Some(&product.name),
        Some(product.purchase_price),
        Some(product.sale_price),
    )?;

    let created = state
        .backoffice()
        .with_token(&auth.token)
        .create_product(&product)
        .await?;
    Ok(Json(created))
}

/// Update a product.
pub async fn update(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    validate_product_fields(
        update.sku.as_deref(),
        update.name.as_deref(),
        update.purchase_price,
        update.sale_price,
    )?;

    let updated = state
        .backoffice()
        .with_token(&auth.token)
        .update_product(ProductId::new(id), &update)
        .await?;
    Ok(Json(updated))
}

/// Toggle a product's active flag.
pub async fn set_status(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductStatusUpdate>,
) -> Result<Json<serde_json::Value>> {
    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .set_product_status(ProductId::new(id), body.is_active)
        .await?;

    tracing::info!(product_id = %id, is_active = %body.is_active, "Product status updated");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "Product status updated".to_string())
    })))
}

/// Delete a product.
pub async fn delete(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .delete_product(ProductId::new(id))
        .await?;

    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message.unwrap_or_else(|| "Product deleted".to_string())
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejects_blank_sku() {
        assert!(validate_product_fields(Some("  "), Some("Shirt"), None, None).is_err());
    }

    #[test]
    fn test_validation_rejects_negative_price() {
        assert!(
            validate_product_fields(None, None, Some(Decimal::new(-1, 0)), None).is_err()
        );
    }

    #[test]
    fn test_validation_accepts_partial_update() {
        assert!(validate_product_fields(None, Some("Shirt"), None, Some(Decimal::ONE)).is_ok());
    }
}
