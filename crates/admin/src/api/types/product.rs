//! Catalog entities and request payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use twill_core::{CategoryId, ProductId, StockStatus, VariantId};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: CategoryRef,
    pub brand: String,
    pub material: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    // The backend quotes prices as bare JSON numbers
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A size/color combination of a product with its own stock count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub size: String,
    pub color: String,
    pub stock: i32,
    #[serde(default)]
    pub min_stock: i32,
}

impl ProductVariant {
    /// Derived stock status against the low-stock threshold.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::for_levels(self.stock, self.min_stock)
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// A category reference as embedded in product payloads.
///
/// Some backend endpoints inline the full category object, others only its
/// name. Both shapes occur, so deserialize either.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Full(ProductCategory),
    Name(String),
}

impl CategoryRef {
    /// The category's display name, whichever shape was sent.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Full(category) => &category.name,
            Self::Name(name) => name,
        }
    }
}

/// Denormalized product summary embedded in inventory payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub category: CategoryRef,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Filter parameters for admin product listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Payload to create a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category_id: CategoryId,
    pub brand: String,
    pub material: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    #[serde(default)]
    pub variants: Vec<VariantPayload>,
}

/// Payload to update a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<Decimal>,
}

/// Payload for the product status toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatusUpdate {
    pub is_active: bool,
}

/// Payload to create or update a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

/// Payload to create or update a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub min_stock: i32,
}

/// Payload for the direct variant stock patch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantStockUpdate {
    pub stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_update_serializes_only_set_fields() {
        let update = ProductUpdate {
            name: Some("Oxford Shirt v2".to_string()),
            sale_price: Some(Decimal::new(350_000, 0)),
            ..ProductUpdate::default()
        };
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "Oxford Shirt v2", "salePrice": 350_000.0})
        );
    }

    #[test]
    fn test_new_product_wire_form() {
        let payload = NewProduct {
            sku: "TW-DRESS-003".to_string(),
            name: "Wrap Dress".to_string(),
            category_id: CategoryId::new(4),
            brand: "Twill House".to_string(),
            material: "Viscose".to_string(),
            description: String::new(),
            images: vec![],
            purchase_price: Decimal::new(210_000, 0),
            sale_price: Decimal::new(420_000, 0),
            variants: vec![VariantPayload {
                product_id: None,
                size: "S".to_string(),
                color: "Navy".to_string(),
                stock: 0,
                min_stock: 5,
            }],
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["categoryId"], 4);
        assert_eq!(json["variants"][0]["minStock"], 5);
    }
}
