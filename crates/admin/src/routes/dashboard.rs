//! Admin dashboard handler.

use axum::{Json, extract::State};

use crate::api::types::DashboardStats;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Headline numbers plus recent stock movements.
pub async fn index(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>> {
    let stats = state
        .backoffice()
        .with_token(&auth.token)
        .dashboard()
        .await?;
    Ok(Json(stats))
}
