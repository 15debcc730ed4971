//! Stay Young REST API client for product management.
//!
//! Reads are anonymous. Writes carry the admin's bearer token and a JSON
//! [`ProductDraft`] body.

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use stay_young_core::{Category, Product, ProductDraft, ProductId};

use crate::config::ApiConfig;

/// Shown when the API gives no usable error message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response with a message.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text for an error toast: the API's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Api { message, .. } => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: ErrorMessage,
}

/// Validation failures arrive as a list of messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_text(self) -> String {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.join(", "),
        }
    }
}

/// Admin client for the Stay Young REST API.
#[derive(Clone)]
pub struct AdminApiClient {
    inner: Arc<AdminApiClientInner>,
}

struct AdminApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AdminApiClient {
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

        Ok(Self {
            inner: Arc::new(AdminApiClientInner { client, base_url }),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(&["category"]).await
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(&["product"]).await
    }

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get(&["product", id.as_str()]).await
    }

    /// Check that the API answers at all.
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
    // Writes
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the API's message on a non-success status.
    #[instrument(skip(self, token, draft), fields(name = %draft.name))]
    pub async fn create_product(
        &self,
        token: &SecretString,
        draft: &ProductDraft,
    ) -> Result<(), ApiError> {
        self.write(Method::POST, &["product"], token, Some(draft))
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the API's message on a non-success status.
    #[instrument(skip(self, token, draft), fields(id = %id))]
    pub async fn update_product(
        &self,
        token: &SecretString,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<(), ApiError> {
        self.write(Method::PATCH, &["product", id.as_str()], token, Some(draft))
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the API's message on a non-success status.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete_product(&self, token: &SecretString, id: &ProductId) -> Result<(), ApiError> {
        self.write(Method::DELETE, &["product", id.as_str()], token, None)
            .await
    }

    // =========================================================================
    // HTTP helpers
    // =========================================================================

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
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(parse_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    async fn write(
        &self,
        method: Method,
        segments: &[&str],
        token: &SecretString,
        body: Option<&ProductDraft>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        let mut request = self
            .inner
            .client
            .request(method, url)
            .bearer_auth(token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(parse_error(response).await)
    }
}

impl std::fmt::Debug for AdminApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Read `{ "message": ... }` from an error response.
///
/// A body without a message is a parse failure, which surfaces as the
/// generic error toast.
async fn parse_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return ApiError::Http(e),
    };

    match error_message(&body) {
        Some(message) => ApiError::Api { status, message },
        None => {
            tracing::warn!(
                status,
                body = %body.chars().take(200).collect::<String>(),
                "API error response had no message"
            );
            ApiError::Parse(format!("HTTP {status} without error message"))
        }
    }
}

/// The `message` of an error body, if it has a usable one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.message.into_text())
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_api_message() {
        let err = ApiError::Api {
            status: 409,
            message: "Product with this slug already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Product with this slug already exists");
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        assert_eq!(
            ApiError::Parse("bad".to_string()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            ApiError::NotFound("/product/x".to_string()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"message": "Product not found"}"#).as_deref(),
            Some("Product not found")
        );
        assert_eq!(
            error_message(r#"{"message": ["name must be a string", "price must be positive"]}"#)
                .as_deref(),
            Some("name must be a string, price must be positive")
        );
        assert_eq!(error_message(r#"{"message": []}"#), None);
        assert_eq!(error_message(r#"{"error": "Bad Request"}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }

    #[test]
    fn test_endpoint_with_id() {
        let client = AdminApiClient::new(&ApiConfig::new("http://localhost:4000/api").unwrap())
            .unwrap();
        let url = client
            .endpoint(&["product", ProductId::new("650a1f").as_str()])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/product/650a1f");
    }
}
