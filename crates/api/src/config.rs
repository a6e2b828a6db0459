//! Application configuration loaded from environment variables.

use std::time::Duration;

use saga::HttpReservationClient;
use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Location and credentials of one remote reservation service.
#[derive(Debug, Clone)]
pub struct RemoteServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `TAXI_SERVICE_URL` / `HOTEL_SERVICE_URL` — remote base URLs (required)
/// - `TAXI_SERVICE_API_KEY` / `HOTEL_SERVICE_API_KEY` — optional credentials
/// - `REMOTE_TIMEOUT_SECS` — bound on every remote call (default: 5)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub taxi: RemoteServiceConfig,
    pub hotel: RemoteServiceConfig,
    pub remote_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// The remote service URLs have no default; the server refuses to start
    /// without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let taxi = RemoteServiceConfig {
            base_url: required("TAXI_SERVICE_URL")?,
            api_key: std::env::var("TAXI_SERVICE_API_KEY").ok(),
        };
        let hotel = RemoteServiceConfig {
            base_url: required("HOTEL_SERVICE_URL")?,
            api_key: std::env::var("HOTEL_SERVICE_API_KEY").ok(),
        };
        let remote_timeout = std::env::var("REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(HttpReservationClient::DEFAULT_TIMEOUT);

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            taxi,
            hotel,
            remote_timeout,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
