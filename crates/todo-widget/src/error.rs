use thiserror::Error;

/// Failure to obtain the initial task feed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Seed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Seed source unavailable: {0}")]
    Unavailable(String),
}

/// Failure to read or write the key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage content is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("Unknown filter '{0}'. Expected 'all', 'completed' or 'pending'")]
    InvalidFilter(String),
}
