//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use twill_core::{Price, ProductId, StockStatus, VariantId};

use crate::api::types::{Product, ProductFilter, ProductPage, ProductVariant};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product summary for listing pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardView {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.name().to_string(),
            price: Price::from_amount(product.sale_price).display(),
            image: product.images.first().cloned(),
        }
    }
}

/// Variant display data with derived availability.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantView {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    pub stock: i32,
    pub status: StockStatus,
    pub available: bool,
}

impl From<&ProductVariant> for VariantView {
    fn from(variant: &ProductVariant) -> Self {
        let status = variant.stock_status();
        Self {
            id: variant.id,
            size: variant.size.clone(),
            color: variant.color.clone(),
            stock: variant.stock,
            status,
            available: status != StockStatus::OutOfStock,
        }
    }
}

/// Full product detail payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub material: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub variants: Vec<VariantView>,
}

/// Product listing payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView {
    pub products: Vec<ProductCardView>,
    pub page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

impl From<ProductPage> for ProductListView {
    fn from(page: ProductPage) -> Self {
        let products: Vec<ProductCardView> =
            page.products.iter().map(ProductCardView::from).collect();

        // Fall back to a single page when the backend omits pagination
        let (current, total, total_pages) = page.pagination.map_or_else(
            || (1, products.len() as u64, 1),
            |p| (p.page, p.total, p.total_pages),
        );

        Self {
            products,
            page: current,
            total,
            total_pages,
            has_more_pages: current < total_pages,
        }
    }
}

/// Detail page query parameters.
#[derive(Debug, serde::Deserialize)]
pub struct DetailQuery {
    pub refresh: Option<bool>,
}

/// Product listing with search/filter passthrough.
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ProductListView>> {
    // `refresh=true` busts the whole catalog cache before fetching
    if filter.refresh.unwrap_or(false) {
        state.catalog().invalidate_all().await;
    }

    let page = state.catalog().list_products(&filter).await?;
    Ok(Json(ProductListView::from(page)))
}

/// Product detail with per-variant availability.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<ProductDetailView>> {
    let id = ProductId::new(id);

    if query.refresh.unwrap_or(false) {
        state.catalog().invalidate_product(id).await;
    }

    // Fetch the product and a fresh stock snapshot in parallel
    let (product_result, variants_result) = tokio::join!(
        state.catalog().get_product(id),
        state.catalog().variants_for_product(id),
    );

    let product = product_result?;

    // Inactive products are not visible on the storefront
    if !product.is_active {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    // Prefer the fresh variant snapshot; the cached product copy is the fallback
    let variants = match variants_result {
        Ok(fresh) if !fresh.is_empty() => fresh,
        Ok(_) => product.variants.clone(),
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "Failed to refresh variants");
            product.variants.clone()
        }
    };

    Ok(Json(ProductDetailView {
        id: product.id,
        sku: product.sku,
        name: product.name,
        brand: product.brand,
        category: product.category.name().to_string(),
        material: product.material,
        description: product.description,
        price: Price::from_amount(product.sale_price).display(),
        images: product.images,
        variants: variants.iter().map(VariantView::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::types::{CategoryRef, Pagination};

    fn sample_product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "sku": "TW-001",
            "name": "Linen Trousers",
            "category": "Trousers",
            "brand": "Twill House",
            "material": "Linen",
            "description": "Relaxed fit.",
            "images": ["/uploads/a.jpg", "/uploads/b.jpg"],
            "purchasePrice": 150_000,
            "salePrice": 290_000,
            "variants": [
                {"id": 10, "productId": 1, "size": "M", "color": "Sand", "stock": 2, "minStock": 5}
            ],
            "isActive": true,
            "createdAt": "2026-03-01T00:00:00Z",
            "updatedAt": "2026-03-02T00:00:00Z"
        }))
        .expect("valid product")
    }

    #[test]
    fn test_card_view_conversion() {
        let product = sample_product();
        let card = ProductCardView::from(&product);
        assert_eq!(card.category, "Trousers");
        assert_eq!(card.price, "290000₫");
        assert_eq!(card.image.as_deref(), Some("/uploads/a.jpg"));
    }

    #[test]
    fn test_variant_view_availability() {
        let product = sample_product();
        let view = VariantView::from(&product.variants[0]);
        assert_eq!(view.status, StockStatus::LowStock);
        assert!(view.available);

        let sold_out = ProductVariant {
            stock: 0,
            ..product.variants[0].clone()
        };
        let view = VariantView::from(&sold_out);
        assert_eq!(view.status, StockStatus::OutOfStock);
        assert!(!view.available);
    }

    #[test]
    fn test_list_view_pagination_fallback() {
        let page = ProductPage {
            products: vec![sample_product()],
            pagination: None,
        };
        let view = ProductListView::from(page);
        assert_eq!(view.page, 1);
        assert_eq!(view.total, 1);
        assert!(!view.has_more_pages);
    }

    #[test]
    fn test_list_view_uses_backend_pagination() {
        let page = ProductPage {
            products: vec![sample_product()],
            pagination: Some(Pagination {
                page: 2,
                limit: 1,
                total: 5,
                total_pages: 5,
            }),
        };
        let view = ProductListView::from(page);
        assert_eq!(view.page, 2);
        assert_eq!(view.total, 5);
        assert!(view.has_more_pages);
    }

    #[test]
    fn test_card_view_price_uses_sale_price() {
        let mut product = sample_product();
        product.sale_price = Decimal::new(99_000, 0);
        product.category = CategoryRef::Name("Sale".to_string());
        let card = ProductCardView::from(&product);
        assert_eq!(card.price, "99000₫");
    }
}
