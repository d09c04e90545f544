//! Home page handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::api::types::ProductFilter;
use crate::error::Result;
use crate::routes::categories::CategoryView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Number of products featured on the home payload.
const FEATURED_COUNT: u32 = 8;

/// Home page payload: featured products plus the category tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<CategoryView>,
}

/// Home page: first page of active products and all categories.
///
/// Either half failing degrades to an empty list rather than failing the
/// whole page.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let filter = ProductFilter {
        limit: Some(FEATURED_COUNT),
        ..ProductFilter::default()
    };

    let (products_result, categories_result) = tokio::join!(
        state.catalog().list_products(&filter),
        state.catalog().list_categories(),
    );

    let featured = match products_result {
        Ok(page) => page.products.iter().map(ProductCardView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch featured products: {e}");
            vec![]
        }
    };

    let categories = match categories_result {
        Ok(categories) => categories.iter().map(CategoryView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            vec![]
        }
    };

    Ok(Json(HomeView {
        featured,
        categories,
    }))
}
