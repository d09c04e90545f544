//! Retail backend back-office client.
//!
//! JSON REST over `reqwest`, covering the backend's privileged endpoints.
//! Every privileged call goes through [`AuthorizedClient`], which attaches
//! the session's bearer token. A backend 401/403 means the token is invalid
//! or expired and surfaces as [`BackofficeError::AuthExpired`] so the caller
//! can clear its auth state.
//!
//! No response caching: the back office always reads fresh state and
//! re-fetches lists after mutations.

pub mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use twill_core::{CategoryId, ProductId, UserId, VariantId};

use crate::config::BackendConfig;

use types::{
    BulkStockInRequest, CategoryPayload, DashboardStats, Envelope, ExportFile, InventoryReport,
    InventorySummary, InventoryTransaction, InventoryVariant, LoginRequest, LoginResponse,
    LowStockAlert, MovementReceipt, NewProduct, NewUser, Pagination, PasswordChange, Product,
    ProductCategory, ProductFilter, ProductStatusUpdate, ProductUpdate, ProductVariant,
    ProfitReport, ReportKind, ReportRange, SalesReport, StockAdjustRequest, StockInRequest,
    StockOutRequest, TransactionFilter, User, UserFilter, UserStats, UserUpdate, VariantPayload,
    VariantStockUpdate,
};

/// Default content type for Excel downloads when the backend omits one.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Errors from the retail backend API.
#[derive(Debug, Error)]
pub enum BackofficeError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token was rejected (backend 401/403).
    #[error("backend rejected credentials: {0}")]
    AuthExpired(String),

    /// Backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend answered 200 but flagged the request as failed.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape.
    #[error("failed to parse backend response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend is rate limiting; retry after the given number of seconds.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),
}

/// A successful mutation: the decoded payload plus the backend's message.
#[derive(Debug, Clone)]
pub struct Ack<T> {
    pub data: T,
    pub message: Option<String>,
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

// =============================================================================
// BackofficeClient
// =============================================================================

/// Client for the retail backend's privileged endpoints.
///
/// Cheaply cloneable; all clones share one connection pool. Call
/// [`Self::with_token`] to obtain an [`AuthorizedClient`] scoped to a
/// session's bearer token.
#[derive(Clone)]
pub struct BackofficeClient {
    inner: Arc<BackofficeClientInner>,
}

struct BackofficeClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackofficeClient {
    /// Create a new back-office client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(BackofficeClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
            }),
        }
    }

    /// Scope this client to a session's bearer token.
    #[must_use]
    pub const fn with_token<'a>(&'a self, token: &'a str) -> AuthorizedClient<'a> {
        AuthorizedClient {
            client: self,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Decode a backend response into its envelope.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, BackofficeError> {
        let status = response.status();

        // 401/403 means the token is invalid or expired; the caller must
        // clear its auth state
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| "authentication failed".to_string());
            return Err(BackofficeError::AuthExpired(message));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(BackofficeError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&response_text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| response_text.chars().take(200).collect());

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(BackofficeError::NotFound(message));
            }

            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(BackofficeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            BackofficeError::Parse(e)
        })?;

        if !envelope.success {
            return Err(BackofficeError::Rejected(envelope.error_message()));
        }

        Ok(envelope)
    }

    // =========================================================================
    // Unauthenticated Methods
    // =========================================================================

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns `BackofficeError::AuthExpired` on bad credentials, or another
    /// variant if the request fails.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, BackofficeError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .inner
            .client
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;

        let envelope: Envelope<LoginResponse> = Self::decode(response).await?;
        envelope
            .data
            .ok_or_else(|| BackofficeError::Rejected("no data in login response".to_string()))
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn ping(&self) -> Result<(), BackofficeError> {
        let response = self
            .inner
            .client
            .get(self.url("/categories"))
            .send()
            .await?;
        let _: Envelope<serde_json::Value> = Self::decode(response).await?;
        Ok(())
    }
}

// =============================================================================
// AuthorizedClient
// =============================================================================

/// A [`BackofficeClient`] view scoped to one session's bearer token.
pub struct AuthorizedClient<'a> {
    client: &'a BackofficeClient,
    token: &'a str,
}

impl AuthorizedClient<'_> {
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .inner
            .client
            .get(self.client.url(path))
            .bearer_auth(self.token)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .inner
            .client
            .post(self.client.url(path))
            .bearer_auth(self.token)
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .inner
            .client
            .put(self.client.url(path))
            .bearer_auth(self.token)
    }

    fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .inner
            .client
            .patch(self.client.url(path))
            .bearer_auth(self.token)
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .inner
            .client
            .delete(self.client.url(path))
            .bearer_auth(self.token)
    }

    /// GET returning the envelope's data, treating a missing body as an error.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
    ) -> Result<T, BackofficeError> {
        let response = self.get(path).send().await?;
        let envelope: Envelope<T> = BackofficeClient::decode(response).await?;
        envelope
            .data
            .ok_or_else(|| BackofficeError::NotFound(format!("{what} not found")))
    }

    /// GET with query parameters returning a page of items.
    async fn fetch_page<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Page<T>, BackofficeError> {
        let response = self.get(path).query(query).send().await?;
        let envelope: Envelope<Vec<T>> = BackofficeClient::decode(response).await?;
        Ok(Page {
            items: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// Send a mutation and return its acknowledgement.
    async fn mutate<T: DeserializeOwned + Default>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Ack<T>, BackofficeError> {
        let response = request.send().await?;
        let envelope: Envelope<T> = BackofficeClient::decode(response).await?;
        Ok(Ack {
            data: envelope.data.unwrap_or_default(),
            message: envelope.message,
        })
    }

    /// Send a mutation whose response payload is required.
    async fn mutate_required<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, BackofficeError> {
        let response = request.send().await?;
        let envelope: Envelope<T> = BackofficeClient::decode(response).await?;
        envelope
            .data
            .ok_or_else(|| BackofficeError::Rejected(format!("no data in {what} response")))
    }

    // =========================================================================
    // Auth & Profile
    // =========================================================================

    /// Invalidate the bearer token server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), BackofficeError> {
        let response = self.post("/auth/logout").send().await?;
        let _: Envelope<serde_json::Value> = BackofficeClient::decode(response).await?;
        Ok(())
    }

    /// Fetch the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, BackofficeError> {
        self.fetch("/auth/profile", "profile").await
    }

    /// Update the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the update.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        update: &types::ProfileUpdate,
    ) -> Result<User, BackofficeError> {
        self.mutate_required(self.put("/auth/profile").json(update), "profile")
            .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List products for the back office (includes inactive).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, filter))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, BackofficeError> {
        self.fetch_page("/products/admin/all", filter).await
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `BackofficeError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackofficeError> {
        self.fetch(&format!("/products/{id}"), "product").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, BackofficeError> {
        self.mutate_required(self.post("/products").json(product), "product")
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, BackofficeError> {
        self.mutate_required(self.put(&format!("/products/{id}")).json(update), "product")
            .await
    }

    /// Toggle a product's active flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_product_status(
        &self,
        id: ProductId,
        is_active: bool,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        let body = ProductStatusUpdate { is_active };
        self.mutate(self.patch(&format!("/products/{id}/status")).json(&body))
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(
        &self,
        id: ProductId,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.delete(&format!("/products/{id}"))).await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<ProductCategory>, BackofficeError> {
        let response = self.get("/categories").send().await?;
        let envelope: Envelope<Vec<ProductCategory>> = BackofficeClient::decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, category))]
    pub async fn create_category(
        &self,
        category: &CategoryPayload,
    ) -> Result<ProductCategory, BackofficeError> {
        self.mutate_required(self.post("/categories").json(category), "category")
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, category), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        category: &CategoryPayload,
    ) -> Result<ProductCategory, BackofficeError> {
        self.mutate_required(
            self.put(&format!("/categories/{id}")).json(category),
            "category",
        )
        .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(
        &self,
        id: CategoryId,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.delete(&format!("/categories/{id}"))).await
    }

    // =========================================================================
    // Variants
    // =========================================================================

    /// Create a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, variant))]
    pub async fn create_variant(
        &self,
        variant: &VariantPayload,
    ) -> Result<ProductVariant, BackofficeError> {
        self.mutate_required(self.post("/variants").json(variant), "variant")
            .await
    }

    /// Update a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, variant), fields(variant_id = %id))]
    pub async fn update_variant(
        &self,
        id: VariantId,
        variant: &VariantPayload,
    ) -> Result<ProductVariant, BackofficeError> {
        self.mutate_required(self.put(&format!("/variants/{id}")).json(variant), "variant")
            .await
    }

    /// Patch a variant's stock levels directly.
    ///
    /// Prefer the inventory movement endpoints; this is for corrections to
    /// the low-stock threshold alongside the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn update_variant_stock(
        &self,
        id: VariantId,
        update: VariantStockUpdate,
    ) -> Result<ProductVariant, BackofficeError> {
        self.mutate_required(
            self.patch(&format!("/variants/{id}/stock")).json(&update),
            "variant",
        )
        .await
    }

    /// Delete a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn delete_variant(
        &self,
        id: VariantId,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.delete(&format!("/variants/{id}"))).await
    }

    /// Get the current low-stock alerts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn low_stock_alerts(&self) -> Result<Vec<LowStockAlert>, BackofficeError> {
        let response = self.get("/variants/alerts/low-stock").send().await?;
        let envelope: Envelope<Vec<LowStockAlert>> = BackofficeClient::decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Warehouse-wide summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn inventory_summary(&self) -> Result<InventorySummary, BackofficeError> {
        self.fetch("/inventory/summary", "inventory summary").await
    }

    /// List stock rows matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, filter))]
    pub async fn inventory_variants(
        &self,
        filter: &types::VariantStockFilter,
    ) -> Result<Vec<InventoryVariant>, BackofficeError> {
        let response = self.get("/inventory/variants").query(filter).send().await?;
        let envelope: Envelope<Vec<InventoryVariant>> =
            BackofficeClient::decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Paginated transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, filter))]
    pub async fn inventory_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Page<InventoryTransaction>, BackofficeError> {
        self.fetch_page("/inventory/transactions", filter).await
    }

    /// Receive stock into the warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// movement.
    #[instrument(skip(self, request), fields(variant_id = %request.variant_id, quantity = %request.quantity))]
    pub async fn stock_in(
        &self,
        request: &StockInRequest,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.post("/inventory/stock-in").json(request))
            .await
    }

    /// Ship stock out of the warehouse.
    ///
    /// The backend creates a sales order for the captured customer details
    /// as a side effect; the receipt carries its reference when returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// movement (e.g., insufficient stock).
    #[instrument(skip(self, request), fields(variant_id = %request.variant_id, quantity = %request.quantity))]
    pub async fn stock_out(
        &self,
        request: &StockOutRequest,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.post("/inventory/stock-out").json(request))
            .await
    }

    /// Set a variant's on-hand count to an absolute value.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// movement.
    #[instrument(skip(self, request), fields(variant_id = %request.variant_id, new_stock = %request.new_stock))]
    pub async fn adjust_stock(
        &self,
        request: &StockAdjustRequest,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.post("/inventory/stock-adjust").json(request))
            .await
    }

    /// Receive stock for many variants of one product at once, creating
    /// missing variants server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// movement.
    #[instrument(skip(self, request), fields(lines = %request.transactions.len()))]
    pub async fn bulk_stock_in(
        &self,
        request: &BulkStockInRequest,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.post("/inventory/bulk-transaction").json(request))
            .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List users matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, filter))]
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Page<User>, BackofficeError> {
        self.fetch_page("/users", filter).await
    }

    /// Get a single user.
    ///
    /// # Errors
    ///
    /// Returns `BackofficeError::NotFound` if the user does not exist.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<User, BackofficeError> {
        self.fetch(&format!("/users/{id}"), "user").await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User, BackofficeError> {
        self.mutate_required(self.post("/users").json(user), "user")
            .await
    }

    /// Update a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update_user(
        &self,
        id: UserId,
        update: &UserUpdate,
    ) -> Result<User, BackofficeError> {
        self.mutate_required(self.put(&format!("/users/{id}")).json(update), "user")
            .await
    }

    /// Change a user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the payload.
    #[instrument(skip(self, change), fields(user_id = %id))]
    pub async fn change_password(
        &self,
        id: UserId,
        change: &PasswordChange,
    ) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.patch(&format!("/users/{id}/password")).json(change))
            .await
    }

    /// Toggle a user's active flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn toggle_user_status(&self, id: UserId) -> Result<User, BackofficeError> {
        self.mutate_required(self.patch(&format!("/users/{id}/toggle-status")), "user")
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<Ack<MovementReceipt>, BackofficeError> {
        self.mutate(self.delete(&format!("/users/{id}"))).await
    }

    /// Aggregate user counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn user_stats(&self) -> Result<UserStats, BackofficeError> {
        self.fetch("/users/stats/overview", "user stats").await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Daily sales rollups over a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, range))]
    pub async fn sales_report(
        &self,
        range: &ReportRange,
    ) -> Result<Vec<SalesReport>, BackofficeError> {
        let response = self.get("/reports/sales").query(range).send().await?;
        let envelope: Envelope<Vec<SalesReport>> = BackofficeClient::decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Warehouse valuation snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, range))]
    pub async fn inventory_report(
        &self,
        range: &ReportRange,
    ) -> Result<InventoryReport, BackofficeError> {
        let response = self.get("/reports/inventory").query(range).send().await?;
        let envelope: Envelope<InventoryReport> = BackofficeClient::decode(response).await?;
        envelope
            .data
            .ok_or_else(|| BackofficeError::Rejected("no data in report response".to_string()))
    }

    /// Margin rollup over a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, range))]
    pub async fn profit_report(&self, range: &ReportRange) -> Result<ProfitReport, BackofficeError> {
        let response = self.get("/reports/profit").query(range).send().await?;
        let envelope: Envelope<ProfitReport> = BackofficeClient::decode(response).await?;
        envelope
            .data
            .ok_or_else(|| BackofficeError::Rejected("no data in report response".to_string()))
    }

    /// Headline numbers for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, BackofficeError> {
        self.fetch("/reports/dashboard", "dashboard").await
    }

    /// Download an Excel export.
    ///
    /// The backend streams back xlsx bytes; the filename comes from the
    /// `Content-Disposition` header when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers with a
    /// non-success status.
    #[instrument(skip(self, range), fields(kind = %kind))]
    pub async fn export_report(
        &self,
        kind: ReportKind,
        range: &ReportRange,
    ) -> Result<ExportFile, BackofficeError> {
        let path = format!("/reports/{}-export", kind.as_str());
        let response = self
            .get(&path)
            .query(range)
            .query(&[("format", "excel")])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(BackofficeError::AuthExpired(
                "authentication failed".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(BackofficeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(XLSX_CONTENT_TYPE)
            .to_string();

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_disposition_filename)
            .unwrap_or_else(|| format!("{}_report.xlsx", kind.as_str()));

        let bytes = response.bytes().await?.to_vec();

        Ok(ExportFile {
            filename,
            content_type,
            bytes,
        })
    }
}

/// Pull the filename out of a `Content-Disposition` header value.
fn parse_disposition_filename(value: &str) -> Option<String> {
    let marker = "filename=";
    let start = value.find(marker)? + marker.len();
    let rest = value.get(start..)?;
    let name = rest
        .split(';')
        .next()
        .unwrap_or(rest)
        .trim()
        .trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disposition_filename_quoted() {
        assert_eq!(
            parse_disposition_filename(r#"attachment; filename="inventory_report.xlsx""#),
            Some("inventory_report.xlsx".to_string())
        );
    }

    #[test]
    fn test_parse_disposition_filename_bare() {
        assert_eq!(
            parse_disposition_filename("attachment; filename=transactions.xlsx; size=100"),
            Some("transactions.xlsx".to_string())
        );
    }

    #[test]
    fn test_parse_disposition_filename_missing() {
        assert_eq!(parse_disposition_filename("attachment"), None);
        assert_eq!(parse_disposition_filename(r#"attachment; filename="""#), None);
    }
}
