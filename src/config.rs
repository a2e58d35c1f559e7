//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Signing secret used when `JWT_SECRET` is not set. Fine for local
/// development, unsafe anywhere else; startup logs a warning when active.
pub const DEFAULT_JWT_SECRET: &str = "cinecache-insecure-dev-secret";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Base URL of the OMDb API
    pub omdb_api_url: String,
    /// API key sent with every OMDb request
    pub omdb_api_key: String,
    /// Username accepted by the login endpoint
    pub auth_username: String,
    /// Password accepted by the login endpoint
    pub auth_password: String,
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Issued token lifetime in seconds
    pub token_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `OMDB_API_URL` - OMDb endpoint (default: http://www.omdbapi.com)
    /// - `OMDB_API_KEY` - OMDb API key (default: empty)
    /// - `AUTH_USERNAME` / `AUTH_PASSWORD` - Login credentials
    /// - `JWT_SECRET` - Token signing secret (default: insecure dev secret)
    /// - `TOKEN_TTL` - Token lifetime in seconds (default: 86400)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            omdb_api_url: env::var("OMDB_API_URL")
                .unwrap_or_else(|_| "http://www.omdbapi.com".to_string()),
            omdb_api_key: env::var("OMDB_API_KEY").unwrap_or_default(),
            auth_username: env::var("AUTH_USERNAME")
                .unwrap_or_else(|_| "demo@demo.com".to_string()),
            auth_password: env::var("AUTH_PASSWORD").unwrap_or_else(|_| "password".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            token_ttl: env::var("TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
        }
    }

    /// True when the built-in development secret is in use.
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 1000,
            cleanup_interval: 60,
            omdb_api_url: "http://www.omdbapi.com".to_string(),
            omdb_api_key: String::new(),
            auth_username: "demo@demo.com".to_string(),
            auth_password: "password".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl: 86_400,
        }
    }
}
