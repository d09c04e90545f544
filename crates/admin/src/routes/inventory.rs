//! Inventory workflow route handlers.
//!
//! Stock-in, stock-out (with automatic sales-order creation on the backend),
//! absolute adjustments, bulk intake, the stock list, the transaction
//! history, and the warehouse summary.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use twill_core::{Email, StockStatus, TransactionType};

use crate::api::types::{
    BulkStockInRequest, InventorySummary, InventoryTransaction, InventoryVariant, OrderRef,
    StockAdjustRequest, StockInRequest, StockOutRequest, TransactionFilter, VariantStockFilter,
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::ListView;
use crate::state::AppState;

/// A stock row annotated with its derived status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRowView {
    #[serde(flatten)]
    pub variant: InventoryVariant,
    pub status: StockStatus,
    pub needs_attention: bool,
}

impl From<InventoryVariant> for StockRowView {
    fn from(variant: InventoryVariant) -> Self {
        let status = variant.stock_status();
        Self {
            variant,
            status,
            needs_attention: status.needs_attention(),
        }
    }
}

/// Outcome of a stock movement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementView {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<InventoryTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRef>,
}

// =============================================================================
// Validation
// =============================================================================

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_reason(reason: &str) -> Result<()> {
    if reason.trim().is_empty() {
        return Err(AppError::Validation("reason is required".to_string()));
    }
    Ok(())
}

/// Phone numbers are 10-11 ASCII digits.
fn validate_phone(phone: &str) -> Result<()> {
    let digits_only = phone.chars().all(|c| c.is_ascii_digit());
    if !digits_only || !(10..=11).contains(&phone.len()) {
        return Err(AppError::Validation(
            "customerPhone must be 10-11 digits".to_string(),
        ));
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Warehouse-wide summary: totals, category breakdown, recent movements.
pub async fn summary(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<InventorySummary>> {
    let summary = state
        .backoffice()
        .with_token(&auth.token)
        .inventory_summary()
        .await?;
    Ok(Json(summary))
}

/// Stock list with search, category, and stock-level filters.
pub async fn variants(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<VariantStockFilter>,
) -> Result<Json<Vec<StockRowView>>> {
    let rows = state
        .backoffice()
        .with_token(&auth.token)
        .inventory_variants(&filter)
        .await?;
    Ok(Json(rows.into_iter().map(StockRowView::from).collect()))
}

/// Paginated stock-movement history.
pub async fn transactions(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<ListView<InventoryTransaction>>> {
    let page = state
        .backoffice()
        .with_token(&auth.token)
        .inventory_transactions(&filter)
        .await?;
    Ok(Json(ListView::from(page)))
}

/// Receive stock into the warehouse.
pub async fn stock_in(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<StockInRequest>,
) -> Result<Json<MovementView>> {
    validate_quantity(request.quantity)?;
    validate_reason(&request.reason)?;

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .stock_in(&request)
        .await?;

    tracing::info!(
        variant_id = %request.variant_id,
        quantity = %request.quantity,
        user_id = %auth.user.id,
        "Stock received"
    );

    Ok(Json(MovementView {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Stock received".to_string()),
        transaction: ack.data.transaction,
        order: None,
    }))
}

/// Ship stock out; the backend creates a sales order for the customer.
pub async fn stock_out(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<StockOutRequest>,
) -> Result<Json<MovementView>> {
    validate_quantity(request.quantity)?;
    validate_reason(&request.reason)?;

    if request.customer.customer_name.trim().is_empty() {
        return Err(AppError::Validation(
            "customerName is required".to_string(),
        ));
    }
    validate_phone(&request.customer.customer_phone)?;
    if let Some(email) = &request.customer.customer_email {
        Email::parse(email).map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    }

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .stock_out(&request)
        .await?;

    tracing::info!(
        variant_id = %request.variant_id,
        quantity = %request.quantity,
        user_id = %auth.user.id,
        "Stock shipped, sales order requested"
    );

    let order = ack.data.order.or_else(|| {
        ack.data.order_id.map(|id| OrderRef {
            id,
            order_number: None,
        })
    });

    Ok(Json(MovementView {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Stock shipped and sales order created".to_string()),
        transaction: ack.data.transaction,
        order,
    }))
}

/// Set a variant's on-hand count to an absolute value.
pub async fn adjust(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<StockAdjustRequest>,
) -> Result<Json<MovementView>> {
    if request.new_stock < 0 {
        return Err(AppError::Validation(
            "newStock cannot be negative".to_string(),
        ));
    }
    validate_reason(&request.reason)?;

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .adjust_stock(&request)
        .await?;

    tracing::info!(
        variant_id = %request.variant_id,
        new_stock = %request.new_stock,
        user_id = %auth.user.id,
        "Stock adjusted"
    );

    Ok(Json(MovementView {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Stock adjusted".to_string()),
        transaction: ack.data.transaction,
        order: None,
    }))
}

/// Receive stock for many variants of one product, creating missing
/// variants server-side.
pub async fn bulk(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<BulkStockInRequest>,
) -> Result<Json<MovementView>> {
    if request.transactions.is_empty() {
        return Err(AppError::Validation(
            "at least one line is required".to_string(),
        ));
    }
    validate_reason(&request.reason)?;
    for line in &request.transactions {
        validate_quantity(line.quantity)?;
        if line.kind != TransactionType::In {
            return Err(AppError::Validation(
                "bulk intake lines must have type IN".to_string(),
            ));
        }
        if line.size.trim().is_empty() || line.color.trim().is_empty() {
            return Err(AppError::Validation(
                "size and color are required on every line".to_string(),
            ));
        }
    }

    let ack = state
        .backoffice()
        .with_token(&auth.token)
        .bulk_stock_in(&request)
        .await?;

    tracing::info!(
        lines = %request.transactions.len(),
        user_id = %auth.user.id,
        "Bulk stock received"
    );

    Ok(Json(MovementView {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Bulk stock received".to_string()),
        transaction: ack.data.transaction,
        order: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_reason() {
        assert!(validate_reason("Restock from supplier").is_ok());
        assert!(validate_reason("").is_err());
        assert!(validate_reason("   ").is_err());
    }

    #[test]
    fn test_validate_phone_lengths() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("09123456789").is_ok());
        assert!(validate_phone("091234567").is_err());
        assert!(validate_phone("091234567890").is_err());
    }

    #[test]
    fn test_validate_phone_rejects_non_digits() {
        assert!(validate_phone("09-1234567").is_err());
        assert!(validate_phone("+840912345").is_err());
    }

    #[test]
    fn test_stock_row_view_annotates_status() {
        let variant: InventoryVariant = serde_json::from_str(
            r#"{
                "id": 44, "size": "M", "color": "White", "stock": 0, "minStock": 5,
                "product": {"id": 12, "name": "Oxford Shirt", "sku": "TW-SHIRT-012",
                            "category": "Shirts"}
            }"#,
        )
        .expect("deserialize");
        let row = StockRowView::from(variant);
        assert_eq!(row.status, StockStatus::OutOfStock);
        assert!(row.needs_attention);
    }

    #[test]
    fn test_stock_row_view_flattens_variant_fields() {
        let variant: InventoryVariant = serde_json::from_str(
            r#"{
                "id": 44, "size": "M", "color": "White", "stock": 9, "minStock": 5,
                "product": {"id": 12, "name": "Oxford Shirt", "sku": "TW-SHIRT-012",
                            "category": "Shirts"}
            }"#,
        )
        .expect("deserialize");
        let json = serde_json::to_value(StockRowView::from(variant)).expect("serialize");
        assert_eq!(json["id"], 44);
        assert_eq!(json["status"], "IN_STOCK");
        assert_eq!(json["needsAttention"], false);
    }
}
