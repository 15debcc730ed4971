//! Stay Young REST API client (read side).
//!
//! Fetches products and categories over `reqwest` and caches them in `moka`
//! for 5 minutes. The storefront never writes to the API.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use stay_young_core::{Category, Product};

use crate::config::ApiConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Stay Young REST API.
///
/// Cheap to clone; the HTTP client and cache live behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ApiError::Parse(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get(&["product"]).await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown slug, or another error if
    /// the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(slug.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .get(&["product", "slug", slug])
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::NotFound(format!("Product not found: {slug}")),
                other => other,
            })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get(&["category"]).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// Check that the API answers at all. Bypasses the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a server error.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&["category"])?)
            .send()
            .await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: format!("health check returned {status}"),
            });
        }
        Ok(())
    }

    // =========================================================================
    // HTTP helpers
    // =========================================================================

    /// Build `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Parse("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let response = self.inner.client.get(url.clone()).send().await?;
        handle_response(response, url.path()).await
    }
}

/// Decode a success body or map the error status.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(path.to_string()));
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Stay Young API returned non-success status"
        );
        return Err(parse_error(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse Stay Young API response"
        );
        ApiError::Parse(e.to_string())
    })
}

/// Pull `message` out of an error body, falling back to the raw text.
fn parse_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    ApiError::Api { status, message }
}
