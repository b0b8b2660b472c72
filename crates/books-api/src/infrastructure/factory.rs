//! Repository factory for runtime backend selection.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{BookRepository, InMemoryBookRepository, PostgresBookRepository, RepositoryError};
use crate::config::ConfigurationError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for book records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart. Suitable for development and tests.
    #[default]
    InMemory,
    /// `PostgreSQL` storage for production use.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for [`RepositoryFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    /// Required when `storage_mode` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl RepositoryConfig {
    /// Reads the repository settings through `lookup`.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a value cannot be parsed or the
    /// database URL is missing for the `Postgres` mode.
    pub fn from_lookup<Lookup>(lookup: Lookup) -> Result<Self, ConfigurationError>
    where
        Lookup: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let max_connections = match read("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| ConfigurationError::InvalidValue {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let config = Self {
            storage_mode,
            database_url: read("DATABASE_URL"),
            max_connections,
        };

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` when `Postgres` is
    /// selected without a URL.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] RepositoryError),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Creates the configured [`BookRepository`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Builds the repository, connecting and preparing the schema when the
    /// `Postgres` backend is selected.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the configuration is invalid or the database
    /// cannot be reached.
    pub async fn create(&self) -> Result<Arc<dyn BookRepository>, FactoryError> {
        self.config.validate()?;

        match (self.config.storage_mode, self.config.database_url.as_deref()) {
            (StorageMode::InMemory, _) => {
                tracing::info!("Using in-memory book storage");
                Ok(Arc::new(InMemoryBookRepository::new()))
            }
            (StorageMode::Postgres, Some(url)) => {
                let repository =
                    PostgresBookRepository::connect(url, self.config.max_connections).await?;
                repository.ensure_schema().await?;
                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Connected to PostgreSQL book storage"
                );
                Ok(Arc::new(repository))
            }
            (StorageMode::Postgres, None) => Err(ConfigurationError::MissingDatabaseUrl.into()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("Memory", StorageMode::InMemory)]
    #[case("postgres", StorageMode::Postgres)]
    #[case("PG", StorageMode::Postgres)]
    fn storage_mode_parses(#[case] input: &str, #[case] expected: StorageMode) {
        assert_eq!(input.parse::<StorageMode>().unwrap(), expected);
    }

    #[rstest]
    fn storage_mode_rejects_unknown() {
        let error = "mongo".parse::<StorageMode>().unwrap_err();
        assert_eq!(error, ConfigurationError::InvalidStorageMode("mongo".to_string()));
    }

    #[rstest]
    fn defaults_to_in_memory() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RepositoryConfig::default());
    }

    #[rstest]
    fn postgres_requires_database_url() {
        let error =
            RepositoryConfig::from_lookup(lookup_from(&[("STORAGE_MODE", "postgres")])).unwrap_err();
        assert_eq!(error, ConfigurationError::MissingDatabaseUrl);
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let error = RepositoryConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "   "),
        ]))
        .unwrap_err();
        assert_eq!(error, ConfigurationError::MissingDatabaseUrl);
    }

    #[rstest]
    fn postgres_with_url_is_accepted() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/books"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.storage_mode, StorageMode::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/books"));
        assert_eq!(config.max_connections, 4);
    }

    #[rstest]
    #[case("0")]
    #[case("many")]
    fn invalid_pool_size_is_rejected(#[case] value: &str) {
        let error =
            RepositoryConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", value)]))
                .unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::InvalidValue { key: "DATABASE_MAX_CONNECTIONS", .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn factory_creates_in_memory_repository() {
        let factory = RepositoryFactory::new(RepositoryConfig::default());

        let repository = factory.create().await.unwrap();

        assert!(repository.find_all().await.unwrap().is_empty());
    }
}
