//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home payload (featured products + categories)
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (backend reachable)
//!
//! # Products
//! GET  /products          - Product listing with search/filter passthrough
//! GET  /products/{id}     - Product detail with variant availability
//!
//! # Categories
//! GET  /categories        - Category listing
//! GET  /categories/{id}   - Category detail
//! ```

pub mod categories;
pub mod home;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{id}", get(categories::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Category routes
        .nest("/categories", category_routes())
}
