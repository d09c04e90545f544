//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use twill_core::CategoryId;

use crate::api::types::ProductCategory;
use crate::error::Result;
use crate::state::AppState;

/// Category display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
}

impl From<&ProductCategory> for CategoryView {
    fn from(category: &ProductCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
        }
    }
}

/// List all categories.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>> {
    let categories = state.catalog().list_categories().await?;
    Ok(Json(categories.iter().map(CategoryView::from).collect()))
}

/// Show a single category.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryView>> {
    let category = state.catalog().get_category(CategoryId::new(id)).await?;
    Ok(Json(CategoryView::from(&category)))
}
