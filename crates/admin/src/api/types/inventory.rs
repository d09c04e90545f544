//! Inventory workflow entities and request payloads.
//!
//! Stock movements are the heart of the back office: stock-in receives
//! goods, stock-out ships them (the backend creates a sales order as a side
//! effect), and adjust sets an absolute on-hand count.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use twill_core::{OrderId, StockStatus, TransactionId, TransactionType, VariantId};

use super::product::{ProductSummary, ProductVariant};
use super::user::UserSummary;

/// A stock row: variant plus its owning product, as listed by
/// `/inventory/variants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryVariant {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    pub stock: i32,
    #[serde(default)]
    pub min_stock: i32,
    pub product: ProductSummary,
}

impl InventoryVariant {
    /// Derived stock status against the low-stock threshold.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::for_levels(self.stock, self.min_stock)
    }
}

/// A recorded stock movement with its denormalized context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTransaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: i32,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    pub reason: String,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub variant: Option<ProductVariant>,
    #[serde(default)]
    pub product: Option<ProductSummary>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// A low-stock alert row from `/variants/alerts/low-stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    pub stock: i32,
    pub min_stock: i32,
    pub product: ProductSummary,
}

/// Warehouse-wide summary from `/inventory/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub overview: InventoryOverview,
    #[serde(default)]
    pub category_breakdown: Vec<CategoryBreakdown>,
    #[serde(default)]
    pub recent_transactions: Vec<InventoryTransaction>,
}

/// Warehouse totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_products: u64,
    pub total_variants: u64,
    pub total_stock_units: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_stock_value: Decimal,
    pub low_stock_variants: u64,
    pub out_of_stock_variants: u64,
}

/// Per-category stock rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub id: twill_core::CategoryId,
    pub name: String,
    pub product_count: u64,
    pub variant_count: u64,
    pub total_stock: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock_value: Decimal,
}

/// Filter for the stock list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantStockFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_stock: Option<bool>,
}

/// Filter for the transaction history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Customer details captured on stock-out; the backend creates the sales
/// order from these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Stock-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInRequest {
    pub variant_id: VariantId,
    pub quantity: i32,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Stock-out request body. Flattens the customer details into the wire form
/// the backend expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOutRequest {
    pub variant_id: VariantId,
    pub quantity: i32,
    pub reason: String,
    #[serde(flatten)]
    pub customer: CustomerDetails,
}

/// Stock adjustment request body. `new_stock` is an absolute count, never a
/// delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustRequest {
    pub variant_id: VariantId,
    pub new_stock: i32,
    pub reason: String,
}

/// One line of a bulk stock-in: identifies or creates the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLine {
    pub product_id: twill_core::ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    #[serde(default)]
    pub min_stock: i32,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Bulk stock-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStockInRequest {
    pub transactions: Vec<BulkLine>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Receipt for a stock movement. The backend's response shape varies by
/// operation; everything here is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementReceipt {
    pub transaction: Option<InventoryTransaction>,
    pub order: Option<OrderRef>,
    pub order_id: Option<OrderId>,
}

/// Reference to the sales order created by a stock-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_out_request_flattens_customer() {
        let request = StockOutRequest {
            variant_id: VariantId::new(44),
            quantity: 2,
            reason: "Counter sale".to_string(),
            customer: CustomerDetails {
                customer_name: "Lan Pham".to_string(),
                customer_phone: "0912345678".to_string(),
                customer_email: None,
            },
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "variantId": 44,
                "quantity": 2,
                "reason": "Counter sale",
                "customerName": "Lan Pham",
                "customerPhone": "0912345678"
            })
        );
    }

    #[test]
    fn test_transaction_deserializes_with_context() {
        let transaction: InventoryTransaction = serde_json::from_str(
            r#"{
                "id": 901,
                "type": "out",
                "quantity": 2,
                "reason": "Counter sale",
                "createdAt": "2026-07-01T10:15:00Z",
                "variant": {"id": 44, "size": "M", "color": "White", "stock": 6, "minStock": 5},
                "product": {"id": 12, "name": "Oxford Shirt", "sku": "TW-SHIRT-012", "category": "Shirts"},
                "user": {"id": 2, "name": "Minh Tran", "email": "minh@twill.example"}
            }"#,
        )
        .expect("deserialize");
        assert_eq!(transaction.kind, TransactionType::Out);
        assert_eq!(
            transaction.product.as_ref().map(|p| p.sku.as_str()),
            Some("TW-SHIRT-012")
        );
        assert!(transaction.reference_number.is_none());
    }

    #[test]
    fn test_bulk_request_wire_form() {
        let request = BulkStockInRequest {
            transactions: vec![BulkLine {
                product_id: twill_core::ProductId::new(12),
                size: "M".to_string(),
                color: "White".to_string(),
                quantity: 10,
                min_stock: 5,
                kind: TransactionType::In,
            }],
            reason: "Restock from supplier".to_string(),
            supplier: Some("Hanoi Textiles".to_string()),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["transactions"][0]["type"], "IN");
        assert_eq!(json["transactions"][0]["productId"], 12);
        assert_eq!(json["supplier"], "Hanoi Textiles");
    }

    #[test]
    fn test_summary_deserializes() {
        let summary: InventorySummary = serde_json::from_str(
            r#"{
                "overview": {
                    "totalProducts": 24,
                    "totalVariants": 96,
                    "totalStockUnits": 1240,
                    "totalStockValue": 186000000,
                    "lowStockVariants": 7,
                    "outOfStockVariants": 2
                },
                "categoryBreakdown": [
                    {"id": 3, "name": "Shirts", "productCount": 8, "variantCount": 30,
                     "totalStock": 420, "stockValue": 63000000}
                ],
                "recentTransactions": []
            }"#,
        )
        .expect("deserialize");
        assert_eq!(summary.overview.low_stock_variants, 7);
        assert_eq!(summary.category_breakdown.len(), 1);
    }

    #[test]
    fn test_movement_receipt_tolerates_unknown_shapes() {
        let receipt: MovementReceipt =
            serde_json::from_str(r#"{"somethingElse": true}"#).expect("deserialize");
        assert!(receipt.transaction.is_none());
        assert!(receipt.order.is_none());

        let receipt: MovementReceipt =
            serde_json::from_str(r#"{"order": {"id": 55, "orderNumber": "SO-0055"}}"#)
                .expect("deserialize");
        assert_eq!(
            receipt.order.map(|o| o.id),
            Some(twill_core::OrderId::new(55))
        );
    }

    #[test]
    fn test_inventory_variant_status() {
        let variant: InventoryVariant = serde_json::from_str(
            r#"{
                "id": 44, "size": "M", "color": "White", "stock": 3, "minStock": 5,
                "product": {"id": 12, "name": "Oxford Shirt", "sku": "TW-SHIRT-012",
                            "category": {"id": 3, "name": "Shirts", "slug": "shirts"}}
            }"#,
        )
        .expect("deserialize");
        assert_eq!(variant.stock_status(), StockStatus::LowStock);
    }
}
