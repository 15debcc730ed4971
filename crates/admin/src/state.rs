//! Application state for admin.

use std::sync::Arc;

use crate::api::{AdminApiClient, ApiError};
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: AdminApiClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = AdminApiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the REST API client.
    #[must_use]
    pub fn api(&self) -> &AdminApiClient {
        &self.inner.api
    }
}
