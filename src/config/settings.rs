//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_CORS_ALLOWED_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_LOCATION_API_TIMEOUT_SECONDS,
    DEFAULT_LOCATION_API_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub location_api_url: String,
    pub location_api_timeout_seconds: u64,
    pub cors_allowed_origin: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("location_api_url", &self.location_api_url)
            .field(
                "location_api_timeout_seconds",
                &self.location_api_timeout_seconds,
            )
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            location_api_url: DEFAULT_LOCATION_API_URL.to_string(),
            location_api_timeout_seconds: DEFAULT_LOCATION_API_TIMEOUT_SECONDS,
            cors_allowed_origin: DEFAULT_CORS_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            location_api_url: env::var("LOCATION_API_URL").unwrap_or(defaults.location_api_url),
            location_api_timeout_seconds: env::var("LOCATION_API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.location_api_timeout_seconds),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or(defaults.cors_allowed_origin),
        }
    }

    /// Request timeout for the location API.
    pub fn location_api_timeout(&self) -> Duration {
        Duration::from_secs(self.location_api_timeout_seconds)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
