//! Report route handlers: JSON views plus Excel export passthrough.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};

use crate::api::types::{InventoryReport, ProfitReport, ReportKind, ReportRange, SalesReport};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Daily sales rollups over a date range.
pub async fn sales(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(range): Query<ReportRange>,
) -> Result<Json<Vec<SalesReport>>> {
    let report = state
        .backoffice()
        .with_token(&auth.token)
        .sales_report(&range)
        .await?;
    Ok(Json(report))
}

/// Warehouse valuation snapshot.
pub async fn inventory(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(range): Query<ReportRange>,
) -> Result<Json<InventoryReport>> {
    let report = state
        .backoffice()
        .with_token(&auth.token)
        .inventory_report(&range)
        .await?;
    Ok(Json(report))
}

/// Margin rollup over a date range.
pub async fn profit(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Query(range): Query<ReportRange>,
) -> Result<Json<ProfitReport>> {
    let report = state
        .backoffice()
        .with_token(&auth.token)
        .profit_report(&range)
        .await?;
    Ok(Json(report))
}

/// Download an Excel export, relaying the backend's bytes and metadata.
pub async fn export(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(range): Query<ReportRange>,
) -> Result<impl IntoResponse> {
    let kind: ReportKind = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("unknown report: {kind}")))?;

    let file = state
        .backoffice()
        .with_token(&auth.token)
        .export_report(kind, &range)
        .await?;

    tracing::info!(
        kind = %kind,
        filename = %file.filename,
        bytes = %file.bytes.len(),
        "Report exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    ))
}
