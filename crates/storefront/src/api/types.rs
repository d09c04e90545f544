//! Wire types for the retail backend's public catalog endpoints.
//!
//! The backend speaks camelCase JSON and wraps every payload in an
//! [`Envelope`]. These are transient copies of server-owned data; nothing
//! here is persisted locally.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use twill_core::{CategoryId, ProductId, StockStatus, VariantId};

/// Standard response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Join the backend's error strings into a single message.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if self.errors.is_empty() {
            "request rejected by backend".to_string()
        } else {
            self.errors.join("; ")
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

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
/// name. Both shapes occur in the wild, so deserialize either.
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

/// Sort direction for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter parameters for product listings.
///
/// Forwarded verbatim to the backend - all matching and sorting happens
/// server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Client-side only: bust the cache before fetching. Never forwarded.
    #[serde(skip_serializing)]
    pub refresh: Option<bool>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl ProductFilter {
    /// Whether this filter selects anything beyond a plain page of results.
    ///
    /// Plain pages are safe to cache; filtered and search queries are not.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.sort_by.is_none()
            && self.sort_order.is_none()
    }
}

/// A page of products with its pagination metadata.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 12,
        "sku": "TW-SHIRT-012",
        "name": "Oxford Shirt",
        "category": {"id": 3, "name": "Shirts", "slug": "shirts"},
        "brand": "Twill House",
        "material": "Cotton",
        "description": "Classic oxford shirt.",
        "images": ["/uploads/tw-shirt-012-a.jpg"],
        "purchasePrice": 180000,
        "salePrice": 320000,
        "variants": [
            {"id": 44, "productId": 12, "size": "M", "color": "White", "stock": 8, "minStock": 5},
            {"id": 45, "productId": 12, "size": "L", "color": "White", "stock": 0, "minStock": 5}
        ],
        "isActive": true,
        "createdAt": "2026-05-01T09:30:00Z",
        "updatedAt": "2026-06-11T14:00:00Z"
    }"#;

    #[test]
    fn test_product_deserializes_camel_case() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).expect("deserialize");
        assert_eq!(product.sku, "TW-SHIRT-012");
        assert_eq!(product.category.name(), "Shirts");
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.sale_price, Decimal::new(320_000, 0));
    }

    #[test]
    fn test_variant_stock_status() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).expect("deserialize");
        let statuses: Vec<StockStatus> =
            product.variants.iter().map(ProductVariant::stock_status).collect();
        assert_eq!(statuses, vec![StockStatus::InStock, StockStatus::OutOfStock]);
    }

    #[test]
    fn test_category_ref_accepts_bare_name() {
        let json = r#"{
            "id": 9, "sku": "X", "name": "Tee", "category": "T-Shirts",
            "brand": "B", "material": "Cotton", "description": "",
            "purchasePrice": 1, "salePrice": 2, "isActive": true,
            "createdAt": "2026-01-01T00:00:00Z", "updatedAt": "2026-01-01T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.category.name(), "T-Shirts");
        assert!(product.variants.is_empty());
    }

    #[test]
    fn test_envelope_error_message_prefers_message() {
        let envelope: Envelope<Product> = serde_json::from_str(
            r#"{"success": false, "data": null, "message": "boom", "errors": ["a", "b"]}"#,
        )
        .expect("deserialize");
        assert!(!envelope.success);
        assert_eq!(envelope.error_message(), "boom");
    }

    #[test]
    fn test_envelope_error_message_joins_errors() {
        let envelope: Envelope<Product> =
            serde_json::from_str(r#"{"success": false, "data": null, "errors": ["a", "b"]}"#)
                .expect("deserialize");
        assert_eq!(envelope.error_message(), "a; b");
    }

    #[test]
    fn test_filter_query_serialization_skips_none() {
        let filter = ProductFilter {
            search: Some("linen".to_string()),
            min_price: Some(Decimal::new(100_000, 0)),
            sort_order: Some(SortOrder::Desc),
            ..ProductFilter::default()
        };
        let query = serde_urlencoded::to_string(&filter).expect("encode");
        assert_eq!(query, "search=linen&minPrice=100000&sortOrder=desc");
    }

    #[test]
    fn test_filter_never_forwards_refresh() {
        let filter = ProductFilter {
            refresh: Some(true),
            limit: Some(8),
            ..ProductFilter::default()
        };
        let query = serde_urlencoded::to_string(&filter).expect("encode");
        assert_eq!(query, "limit=8");
    }

    #[test]
    fn test_filter_plain_detection() {
        assert!(ProductFilter::default().is_plain());
        assert!(
            ProductFilter {
                page: Some(2),
                limit: Some(20),
                ..ProductFilter::default()
            }
            .is_plain()
        );
        assert!(
            !ProductFilter {
                search: Some("x".to_string()),
                ..ProductFilter::default()
            }
            .is_plain()
        );
    }
}
