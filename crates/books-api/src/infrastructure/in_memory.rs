//! In-memory repository implementation.
//!
//! Books live in a `BTreeMap` keyed by id behind a tokio `RwLock`, so the
//! natural iteration order is ascending id. Identifiers come from a counter
//! that only moves forward; an id freed by a delete is never handed out
//! again.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{Book, BookFields, BookId};
use crate::infrastructure::{BookRepository, RepositoryError};

#[derive(Debug, Default)]
struct Shelf {
    books: BTreeMap<BookId, Book>,
    last_id: i64,
}

/// In-memory implementation of [`BookRepository`].
///
/// Cloning shares the same underlying storage.
///
/// # Example
///
/// ```ignore
/// use books_api::infrastructure::InMemoryBookRepository;
///
/// let repository = InMemoryBookRepository::new();
/// let book = repository.create(BookFields::new("Dune", "Herbert", 1965)).await?;
/// assert_eq!(repository.find_by_id(book.id).await?, Some(book));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    shelf: Arc<RwLock<Shelf>>,
}

impl InMemoryBookRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored books.
    pub async fn len(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[allow(clippy::significant_drop_tightening)]
impl BookRepository for InMemoryBookRepository {
    fn find_all(&self) -> BoxFuture<'static, Result<Vec<Book>, RepositoryError>> {
        let shelf = Arc::clone(&self.shelf);
        Box::pin(async move {
            let guard = shelf.read().await;
            Ok(guard.books.values().cloned().collect())
        })
    }

    fn find_by_id(&self, id: BookId) -> BoxFuture<'static, Result<Option<Book>, RepositoryError>> {
        let shelf = Arc::clone(&self.shelf);
        Box::pin(async move {
            let guard = shelf.read().await;
            Ok(guard.books.get(&id).cloned())
        })
    }

    fn create(&self, fields: BookFields) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        let shelf = Arc::clone(&self.shelf);
        Box::pin(async move {
            let mut guard = shelf.write().await;
            guard.last_id = guard
                .last_id
                .checked_add(1)
                .ok_or_else(|| RepositoryError::DatabaseError("id space exhausted".to_string()))?;
            let book = Book::from_fields(BookId::new(guard.last_id), fields);
            guard.books.insert(book.id, book.clone());
            Ok(book)
        })
    }

    fn update(
        &self,
        id: BookId,
        fields: BookFields,
    ) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        let shelf = Arc::clone(&self.shelf);
        Box::pin(async move {
            let mut guard = shelf.write().await;
            let slot = guard
                .books
                .get_mut(&id)
                .ok_or_else(|| RepositoryError::not_found(id))?;
            *slot = Book::from_fields(id, fields);
            Ok(slot.clone())
        })
    }

    fn delete(&self, id: BookId) -> BoxFuture<'static, Result<(), RepositoryError>> {
        let shelf = Arc::clone(&self.shelf);
        Box::pin(async move {
            let mut guard = shelf.write().await;
            guard
                .books
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found(id))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
