//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BAZAAR_API_BASE_URL` - Catalog API base URL
//! - `BAZAAR_DATABASE_PATH` - SQLite database file path
//!
//! Page size and prefetch distance are compile-time constants in
//! [`crate::paging`].

use std::path::PathBuf;

use thiserror::Error;

/// Default catalog API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://5fc9346b2af77700165ae514.mockapi.io";

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "bazaar.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog API base URL.
    pub api_base_url: String,
    /// SQLite database file path.
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable has an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("BAZAAR_API_BASE_URL", DEFAULT_API_BASE_URL);
        if api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "BAZAAR_API_BASE_URL".to_owned(),
                "must not be empty".to_owned(),
            ));
        }

        let database_path = get_env_or_default("BAZAAR_DATABASE_PATH", DEFAULT_DATABASE_PATH);
        if database_path.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "BAZAAR_DATABASE_PATH".to_owned(),
                "must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            database_path: PathBuf::from(database_path),
        })
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }
}
