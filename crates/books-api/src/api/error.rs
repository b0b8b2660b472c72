use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::infrastructure::RepositoryError;

// =============================================================================
// Response Body
// =============================================================================

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Vec<FieldError>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

// =============================================================================
// ApiError
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    ValidationError {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{message}")]
    PayloadTooLarge { message: String },

    #[error("{entity_type} not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("{message}")]
    InternalError { message: String },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self::ValidationError {
            message: "Invalid request body".to_string(),
            details,
        }
    }

    #[must_use]
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(vec![FieldError::new(field, message)])
    }

    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn book_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Book", identifier)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> String {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED".to_string(),
            Self::ValidationError { .. } => "VALIDATION_ERROR".to_string(),
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE".to_string(),
            Self::NotFound { entity_type, .. } => {
                format!("{}_NOT_FOUND", entity_type.to_uppercase().replace(' ', "_"))
            }
            Self::InternalError { .. } => "INTERNAL_ERROR".to_string(),
        }
    }

    #[must_use]
    pub fn to_response_body(&self) -> ErrorResponse {
        match self {
            Self::ValidationError { details, .. } => {
                ErrorResponse::with_details(self.error_code(), self.to_string(), details.clone())
            }
            _ => ErrorResponse::new(self.error_code(), self.to_string()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(identifier) => Self::book_not_found(identifier),
            RepositoryError::DatabaseError(message) => {
                tracing::error!(%message, "Book store operation failed");
                Self::internal(message)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::unauthorized(error.to_string())
    }
}

/// Oversized bodies keep their 413; every other rejection is a `body` field error.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large(rejection.body_text());
        }
        Self::validation_field("body", rejection.body_text())
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response_body())).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
