//! `PostgreSQL` repository implementation.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS books (
//!     id BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     author TEXT NOT NULL,
//!     published_year INTEGER NOT NULL
//! );
//! ```
//!
//! Single-statement writes (`INSERT .. RETURNING`, `UPDATE .. RETURNING`,
//! `DELETE`) give per-record atomicity without explicit transactions.

use futures::future::BoxFuture;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::{Book, BookFields, BookId};
use crate::infrastructure::{BookRepository, RepositoryError};

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS books (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    published_year INTEGER NOT NULL
)
";

/// Row shape of the `books` table.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    published_year: i32,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId::new(row.id),
            title: row.title,
            author: row.author,
            published_year: row.published_year,
        }
    }
}

// =============================================================================
// PostgreSQL Book Repository
// =============================================================================

/// `PostgreSQL` implementation of [`BookRepository`].
///
/// # Example
///
/// ```ignore
/// let repository = PostgresBookRepository::connect("postgres://localhost/books", 10).await?;
/// repository.ensure_schema().await?;
/// let books = repository.find_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    /// Wraps an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DatabaseError`] when the pool cannot connect.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `books` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DatabaseError`] when the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("books table ensured");
        Ok(())
    }
}

impl BookRepository for PostgresBookRepository {
    fn find_all(&self) -> BoxFuture<'static, Result<Vec<Book>, RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let rows: Vec<BookRow> = sqlx::query_as(
                "SELECT id, title, author, published_year FROM books ORDER BY id",
            )
            .fetch_all(&pool)
            .await?;
            Ok(rows.into_iter().map(Book::from).collect())
        })
    }

    fn find_by_id(&self, id: BookId) -> BoxFuture<'static, Result<Option<Book>, RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let row: Option<BookRow> = sqlx::query_as(
                "SELECT id, title, author, published_year FROM books WHERE id = $1",
            )
            .bind(id.value())
            .fetch_optional(&pool)
            .await?;
            Ok(row.map(Book::from))
        })
    }

    fn create(&self, fields: BookFields) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let row: BookRow = sqlx::query_as(
                r"
                INSERT INTO books (title, author, published_year)
                VALUES ($1, $2, $3)
                RETURNING id, title, author, published_year
                ",
            )
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(fields.published_year)
            .fetch_one(&pool)
            .await?;
            Ok(Book::from(row))
        })
    }

    fn update(
        &self,
        id: BookId,
        fields: BookFields,
    ) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let row: Option<BookRow> = sqlx::query_as(
                r"
                UPDATE books
                SET title = $2, author = $3, published_year = $4
                WHERE id = $1
                RETURNING id, title, author, published_year
                ",
            )
            .bind(id.value())
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(fields.published_year)
            .fetch_optional(&pool)
            .await?;
            row.map(Book::from)
                .ok_or_else(|| RepositoryError::not_found(id))
        })
    }

    fn delete(&self, id: BookId) -> BoxFuture<'static, Result<(), RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM books WHERE id = $1")
                .bind(id.value())
                .execute(&pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(RepositoryError::not_found(id));
            }
            Ok(())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
