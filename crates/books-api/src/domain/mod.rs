//! Domain module for book records.

pub mod book;

pub use book::{Book, BookFields, BookId, InvalidBookId};
