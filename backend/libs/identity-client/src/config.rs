/// Identity client configuration
///
/// Endpoint and timeout settings for calls to the identity service.
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default upper bound on a single identity lookup
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service RPC endpoint
    pub service_url: String,

    /// Hard upper bound for one lookup, in milliseconds
    pub request_timeout_ms: u64,

    /// TCP connect timeout, in milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl IdentityConfig {
    /// Load configuration from environment variables
    ///
    /// `IDENTITY_SERVICE_URL` wins; otherwise the URL is assembled from the
    /// legacy `AUTH_HOST` / `AUTH_PORT` pair.
    pub fn from_env() -> Result<Self, String> {
        let service_url = match env::var("IDENTITY_SERVICE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("AUTH_HOST").unwrap_or_else(|_| "identity-service".to_string());
                let port = env::var("AUTH_PORT").unwrap_or_else(|_| "3001".to_string());
                format!("http://{}:{}", host, port)
            }
        };

        if !service_url.starts_with("http://") && !service_url.starts_with("https://") {
            return Err(format!(
                "IDENTITY_SERVICE_URL must be an http(s) URL, got '{}'",
                service_url
            ));
        }

        let request_timeout_ms = match env::var("IDENTITY_REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("Failed to parse IDENTITY_REQUEST_TIMEOUT_MS='{}': {}", raw, e))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        if request_timeout_ms == 0 {
            return Err("IDENTITY_REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        Ok(Self {
            service_url,
            request_timeout_ms,
            connect_timeout_ms: env::var("IDENTITY_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
        })
    }

    /// Configuration for development/testing
    pub fn development() -> Self {
        Self {
            service_url: "http://localhost:3001".to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            connect_timeout_ms: 1_000,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
