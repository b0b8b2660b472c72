//! Repository trait for book records.
//!
//! Every method returns a boxed `'static` future so the trait stays
//! object-safe and repositories can be shared as `Arc<dyn BookRepository>`
//! across request handlers.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Book, BookFields, BookId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record matches the requested identifier.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// The underlying engine failed.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl RepositoryError {
    #[must_use]
    pub fn not_found(id: BookId) -> Self {
        Self::NotFound(id.to_string())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

// =============================================================================
// Book Repository
// =============================================================================

/// Persistence contract for [`Book`] records.
///
/// Each operation is atomic with respect to a single record. Lookups by an
/// identifier that matches nothing yield `Ok(None)` from `find_by_id` and
/// [`RepositoryError::NotFound`] from `update` and `delete`.
pub trait BookRepository: Send + Sync {
    /// Lists every book in the store's natural (ascending id) order.
    fn find_all(&self) -> BoxFuture<'static, Result<Vec<Book>, RepositoryError>>;

    /// Finds a single book.
    fn find_by_id(&self, id: BookId) -> BoxFuture<'static, Result<Option<Book>, RepositoryError>>;

    /// Inserts a new record and returns it with its assigned id.
    fn create(&self, fields: BookFields) -> BoxFuture<'static, Result<Book, RepositoryError>>;

    /// Replaces the fields of an existing record.
    fn update(
        &self,
        id: BookId,
        fields: BookFields,
    ) -> BoxFuture<'static, Result<Book, RepositoryError>>;

    /// Removes a record permanently.
    fn delete(&self, id: BookId) -> BoxFuture<'static, Result<(), RepositoryError>>;
}

// =============================================================================
// Tests
// =============================================================================
