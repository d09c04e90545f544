//! Retail backend catalog client.
//!
//! JSON REST over `reqwest`, covering the backend's public endpoints only -
//! no credentials are attached. Products and categories are cached with
//! `moka` (5-minute TTL); anything filtered or searched bypasses the cache.

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use twill_core::{CategoryId, ProductId};

use crate::config::BackendConfig;

use cache::CacheValue;
use types::{Envelope, Product, ProductCategory, ProductFilter, ProductPage, ProductVariant};

/// Cache time-to-live for catalog reads.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached entries.
const CACHE_CAPACITY: u64 = 1000;

/// Errors from the retail backend API.
#[derive(Debug, Error)]
pub enum RetailApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

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

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the retail backend's public catalog endpoints.
///
/// Cheaply cloneable; all clones share one connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                cache,
            }),
        }
    }

    /// Execute a GET request and unwrap the response envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, RetailApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        self.execute(self.inner.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Envelope<T>, RetailApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        self.execute(self.inner.client.get(url).query(query)).await
    }

    /// Send a request and decode the backend envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, RetailApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(RetailApiError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            // Error bodies usually still carry the envelope with a message
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&response_text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| response_text.chars().take(200).collect());

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(RetailApiError::NotFound(message));
            }

            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(RetailApiError::Status {
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
            RetailApiError::Parse(e)
        })?;

        if !envelope.success {
            return Err(RetailApiError::Rejected(envelope.error_message()));
        }

        Ok(envelope)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products matching the filter.
    ///
    /// Unfiltered pages are cached; filtered and search queries always go to
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, filter))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<ProductPage, RetailApiError> {
        let cache_key = format!(
            "products:{}:{}",
            filter.page.unwrap_or(1),
            filter.limit.unwrap_or(0)
        );

        if filter.is_plain()
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let envelope: Envelope<Vec<Product>> =
            self.get_with_query("/products", filter).await?;

        let page = ProductPage {
            products: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        };

        if filter.is_plain() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RetailApiError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, RetailApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let envelope: Envelope<Product> = self.get(&format!("/products/{id}")).await?;
        let product = envelope
            .data
            .ok_or_else(|| RetailApiError::NotFound(format!("product {id} not found")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the variants of a product.
    ///
    /// Never cached - stock counts must be fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn variants_for_product(
        &self,
        id: ProductId,
    ) -> Result<Vec<ProductVariant>, RetailApiError> {
        let envelope: Envelope<Vec<ProductVariant>> =
            self.get(&format!("/variants/product/{id}")).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<ProductCategory>, RetailApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let envelope: Envelope<Vec<ProductCategory>> = self.get("/categories").await?;
        let categories = envelope.data.unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a single category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RetailApiError::NotFound` if the category does not exist.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: CategoryId) -> Result<ProductCategory, RetailApiError> {
        let cache_key = format!("category:{id}");

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let envelope: Envelope<ProductCategory> = self.get(&format!("/categories/{id}")).await?;
        let category = envelope
            .data
            .ok_or_else(|| RetailApiError::NotFound(format!("category {id} not found")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    // =========================================================================
    // Health & Cache Management
    // =========================================================================

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the call.
    pub async fn ping(&self) -> Result<(), RetailApiError> {
        let _: Envelope<Vec<ProductCategory>> = self.get("/categories").await?;
        Ok(())
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&format!("product:{id}")).await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
