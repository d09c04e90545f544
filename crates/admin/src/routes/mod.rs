//! HTTP route handlers for the admin service.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                    - Liveness check
//! GET   /health/ready              - Readiness check (backend reachable)
//!
//! # Auth
//! POST  /auth/login                - Sign in, establish session
//! POST  /auth/logout               - Sign out
//! GET   /auth/session              - Session expiry info
//! GET   /auth/profile              - Current operator's profile
//! PUT   /auth/profile              - Update own profile
//!
//! # Dashboard
//! GET   /dashboard                 - Headline numbers + recent movements
//!
//! # Products
//! GET   /products                  - Listing (includes inactive)
//! POST  /products                  - Create
//! GET   /products/{id}             - Detail
//! PUT   /products/{id}             - Update
//! DELETE /products/{id}            - Delete
//! PATCH /products/{id}/status      - Toggle active flag
//!
//! # Categories
//! GET   /categories                - Listing
//! POST  /categories                - Create
//! PUT   /categories/{id}           - Update
//! DELETE /categories/{id}          - Delete
//!
//! # Variants
//! POST  /variants                  - Create
//! PUT   /variants/{id}             - Update
//! PATCH /variants/{id}/stock       - Patch stock levels
//! DELETE /variants/{id}            - Delete
//! GET   /variants/alerts           - Low-stock alerts
//!
//! # Inventory
//! GET   /inventory/summary         - Warehouse summary
//! GET   /inventory/variants        - Stock list (filterable)
//! GET   /inventory/transactions    - Movement history (paginated)
//! POST  /inventory/stock-in        - Receive stock
//! POST  /inventory/stock-out       - Ship stock (creates a sales order)
//! POST  /inventory/adjust          - Absolute stock correction
//! POST  /inventory/bulk            - Bulk intake for one product
//!
//! # Users (Admin role)
//! GET   /users                     - Listing
//! POST  /users                     - Create
//! GET   /users/{id}                - Detail
//! PUT   /users/{id}                - Update
//! DELETE /users/{id}               - Delete
//! PATCH /users/{id}/password       - Change password
//! PATCH /users/{id}/toggle-status  - Toggle active flag
//! GET   /users/stats               - Aggregate counts
//!
//! # Reports
//! GET   /reports/sales             - Sales rollups (JSON)
//! GET   /reports/inventory         - Valuation snapshot (JSON)
//! GET   /reports/profit            - Margin rollup (JSON)
//! GET   /reports/{kind}/export     - Excel download passthrough
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod users;
pub mod variants;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use serde::Serialize;

use crate::api::Page;
use crate::state::AppState;

/// A serialized page of items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> From<Page<T>> for ListView<T> {
    fn from(page: Page<T>) -> Self {
        // Fall back to a single page when the backend omits pagination
        let (current, total, total_pages) = page.pagination.map_or_else(
            || (1, page.items.len() as u64, 1),
            |p| (p.page, p.total, p.total_pages),
        );

        Self {
            items: page.items,
            page: current,
            total,
            total_pages,
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session_info))
        .route("/profile", get(auth::profile).put(auth::update_profile))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/{id}/status", patch(products::set_status))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            put(categories::update).delete(categories::delete),
        )
}

/// Create the variant routes router.
pub fn variant_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(variants::create))
        .route("/{id}", put(variants::update).delete(variants::delete))
        .route("/{id}/stock", patch(variants::update_stock))
        .route("/alerts", get(variants::alerts))
}

/// Create the inventory routes router.
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(inventory::summary))
        .route("/variants", get(inventory::variants))
        .route("/transactions", get(inventory::transactions))
        .route("/stock-in", post(inventory::stock_in))
        .route("/stock-out", post(inventory::stock_out))
        .route("/adjust", post(inventory::adjust))
        .route("/bulk", post(inventory::bulk))
}

/// Create the user management routes router (Admin role enforced per handler).
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route(
            "/{id}",
            get(users::show).put(users::update).delete(users::delete),
        )
        .route("/{id}/password", patch(users::change_password))
        .route("/{id}/toggle-status", patch(users::toggle_status))
        .route("/stats", get(users::stats))
}

/// Create the report routes router.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(reports::sales))
        .route("/inventory", get(reports::inventory))
        .route("/profit", get(reports::profit))
        .route("/{kind}/export", get(reports::export))
}

/// Create all routes for the admin service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::index))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/variants", variant_routes())
        .nest("/inventory", inventory_routes())
        .nest("/users", user_routes())
        .nest("/reports", report_routes())
}

#[cfg(test)]
mod tests {
    use crate::api::types::Pagination;

    use super::*;

    #[test]
    fn test_list_view_pagination_fallback() {
        let page: Page<i32> = Page {
            items: vec![1, 2, 3],
            pagination: None,
        };
        let view = ListView::from(page);
        assert_eq!(view.page, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_list_view_uses_backend_pagination() {
        let page: Page<i32> = Page {
            items: vec![1],
            pagination: Some(Pagination {
                page: 3,
                limit: 1,
                total: 12,
                total_pages: 12,
            }),
        };
        let view = ListView::from(page);
        assert_eq!(view.page, 3);
        assert_eq!(view.total, 12);
    }
}
