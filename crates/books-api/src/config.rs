//! Application configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `5000`)
//! - `PUBLIC_URL`: Base URL advertised in the API description
//!   (default: `http://localhost:{PORT}`)
//! - `JWT_SECRET`: Shared secret used to verify bearer tokens (required)
//! - `STORAGE_MODE`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`: see
//!   [`RepositoryConfig`]
//!
//! A `.env` file in the working directory is honoured by the binary through
//! `dotenvy` before [`AppConfig::from_env`] runs.

use std::env;

use thiserror::Error;

use crate::infrastructure::RepositoryConfig;
use crate::server::ServerConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Configuration Error
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    #[error("JWT_SECRET environment variable is required")]
    MissingJwtSecret,

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub repository: RepositoryConfig,
    pub jwt_secret: String,
    pub public_url: String,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when `JWT_SECRET` is missing, `PORT` is
    /// not a valid port number, or the repository settings are invalid.
    pub fn from_lookup<Lookup>(lookup: Lookup) -> Result<Self, ConfigurationError>
    where
        Lookup: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidValue { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = read("JWT_SECRET").ok_or(ConfigurationError::MissingJwtSecret)?;
        let public_url = read("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let repository = RepositoryConfig::from_lookup(&lookup)?;

        Ok(Self {
            server: ServerConfig::new(host, port),
            repository,
            jwt_secret,
            public_url,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
