//! Book domain model.
//!
//! A [`Book`] is the single persistent resource of the API. Its identifier is
//! assigned by the store on creation and never changes afterwards; every other
//! field is replaced wholesale by an update.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// BookId
// =============================================================================

/// Store-assigned identifier of a book.
///
/// Serialized as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A path segment that is not a plain run of decimal digits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid book id: {0}")]
pub struct InvalidBookId(String);

impl FromStr for BookId {
    type Err = InvalidBookId;

    /// Accepts only unsigned decimal digits, so `+1` and `01x` name no book.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim();
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(InvalidBookId(value.to_string()));
        }
        digits
            .parse()
            .map(Self)
            .map_err(|_| InvalidBookId(value.to_string()))
    }
}

// =============================================================================
// BookFields
// =============================================================================

/// The mutable part of a book.
///
/// Handlers only build this from validated input, so a `BookFields` value
/// always carries a non-blank title and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

impl BookFields {
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, published_year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year,
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

impl Book {
    /// Builds a record from an assigned id and its fields.
    #[must_use]
    pub fn from_fields(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            published_year: fields.published_year,
        }
    }

    /// Returns a copy with every field except the id replaced.
    #[must_use]
    pub fn with_fields(self, fields: BookFields) -> Self {
        Self::from_fields(self.id, fields)
    }

    #[must_use]
    pub fn fields(&self) -> BookFields {
        BookFields::new(&self.title, &self.author, self.published_year)
    }
}

// =============================================================================
// Tests
// =============================================================================
