//! Infrastructure module for book persistence.
//!
//! This module contains the repository contract, its in-memory and
//! `PostgreSQL` implementations, and the factory that picks one at start-up.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{FactoryError, RepositoryConfig, RepositoryFactory, StorageMode};
pub use in_memory::InMemoryBookRepository;
pub use postgres::PostgresBookRepository;
pub use repository::{BookRepository, RepositoryError};
