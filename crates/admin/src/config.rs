//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STAY_YOUNG_API_URL` - Base URL of the Stay Young REST API
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the admin panel (default: `http://localhost:3001`)
//! - `API_TIMEOUT_SECS` - REST API request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// REST API configuration
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Stay Young REST API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            base_url: get_env_or_default("ADMIN_BASE_URL", "http://localhost:3001"),
            api: ApiConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_sample_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_sample_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = get_env_or_default("API_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url: normalize_api_url(&get_required_env("STAY_YOUNG_API_URL")?)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a config for a known base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_api_url(base_url)?,
            timeout: Duration::from_secs(10),
        })
    }
}

/// Validate the API base URL and strip any trailing slash.
fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("STAY_YOUNG_API_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "STAY_YOUNG_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_sample_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    match get_optional_env(key) {
        None => Ok(default),
        Some(raw) => {
            let rate = raw
                .parse::<f32>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
            if (0.0..=1.0).contains(&rate) {
                Ok(rate)
            } else {
                Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must be between 0.0 and 1.0".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(
            normalize_api_url("http://localhost:4000/api/").unwrap(),
            "http://localhost:4000/api"
        );
        assert!(normalize_api_url("localhost:4000").is_err());
        assert!(normalize_api_url("mailto:dev@stayyoung.in").is_err());
    }

    #[test]
    fn test_socket_addr_and_secure() {
        let config = AdminConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 3001,
            base_url: "https://admin.stayyoung.in".to_string(),
            api: ApiConfig::new("https://api.stayyoung.in").unwrap(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        assert_eq!(config.socket_addr().port(), 3001);
        assert!(config.is_secure());
    }
}
