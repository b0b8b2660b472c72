//! Request and response bodies of the book endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, FieldError};
use crate::domain::BookFields;

// =============================================================================
// Requests
// =============================================================================

/// Body of create and update requests.
///
/// Every field is read loosely so that a wrong type or a missing field is
/// reported per field instead of as one opaque parse failure.
///
/// ```json
/// { "title": "Dune", "author": "Frank Herbert", "publishedYear": 1965 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub published_year: Option<Value>,
}

impl BookPayload {
    /// Checks every field and produces the store input.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationError`] listing each offending field.
    pub fn validate(self) -> Result<BookFields, ApiError> {
        let mut details = Vec::new();

        let title = required_text("title", self.title, &mut details);
        let author = required_text("author", self.author, &mut details);
        let published_year = required_year(self.published_year, &mut details);

        match (title, author, published_year) {
            (Some(title), Some(author), Some(year)) if details.is_empty() => {
                Ok(BookFields::new(title, author, year))
            }
            _ => Err(ApiError::validation(details)),
        }
    }
}

fn required_text(
    field: &str,
    value: Option<Value>,
    details: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::String(_)) => {
            details.push(FieldError::new(field, "must not be blank"));
            None
        }
        None | Some(Value::Null) => {
            details.push(FieldError::new(field, "is required"));
            None
        }
        Some(_) => {
            details.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn required_year(value: Option<Value>, details: &mut Vec<FieldError>) -> Option<i32> {
    const FIELD: &str = "publishedYear";

    match value {
        None | Some(Value::Null) => {
            details.push(FieldError::new(FIELD, "is required"));
            None
        }
        Some(Value::Number(number)) => {
            let year = number.as_i64().and_then(|year| i32::try_from(year).ok());
            if year.is_none() {
                details.push(FieldError::new(FIELD, "must be an integer"));
            }
            year
        }
        Some(_) => {
            details.push(FieldError::new(FIELD, "must be an integer"));
            None
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn payload(body: Value) -> BookPayload {
        serde_json::from_value(body).unwrap()
    }

    fn fields_of(error: ApiError) -> Vec<String> {
        match error {
            ApiError::ValidationError { details, .. } => {
                details.into_iter().map(|detail| detail.field).collect()
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[rstest]
    fn valid_payload_becomes_fields() {
        let fields = payload(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publishedYear": 1965
        }))
        .validate()
        .unwrap();

        assert_eq!(fields, BookFields::new("Dune", "Frank Herbert", 1965));
    }

    #[rstest]
    fn empty_payload_reports_every_field() {
        let error = payload(json!({})).validate().unwrap_err();

        assert_eq!(fields_of(error), vec!["title", "author", "publishedYear"]);
    }

    #[rstest]
    #[case(json!({ "title": "  ", "author": "A", "publishedYear": 1 }), "title")]
    #[case(json!({ "title": "T", "author": 5, "publishedYear": 1 }), "author")]
    #[case(json!({ "title": "T", "author": "A", "publishedYear": "1965" }), "publishedYear")]
    #[case(json!({ "title": "T", "author": "A", "publishedYear": 1965.5 }), "publishedYear")]
    #[case(json!({ "title": "T", "author": "A", "publishedYear": 9_999_999_999_i64 }), "publishedYear")]
    #[case(json!({ "title": "T", "author": "A", "publishedYear": null }), "publishedYear")]
    fn single_bad_field_is_reported(#[case] body: Value, #[case] field: &str) {
        let error = payload(body).validate().unwrap_err();

        assert_eq!(fields_of(error), vec![field.to_string()]);
    }

    #[rstest]
    fn negative_year_is_accepted() {
        let fields = payload(json!({ "title": "Iliad", "author": "Homer", "publishedYear": -750 }))
            .validate()
            .unwrap();

        assert_eq!(fields.published_year, -750);
    }

    #[rstest]
    fn unknown_fields_are_ignored() {
        let fields = payload(json!({
            "id": 99,
            "title": "T",
            "author": "A",
            "publishedYear": 2000
        }))
        .validate()
        .unwrap();

        assert_eq!(fields.title, "T");
    }
}
