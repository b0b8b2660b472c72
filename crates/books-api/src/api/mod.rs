//! HTTP layer: request/response bodies, error mapping, handlers and routing.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, FieldError};
pub use routes::create_router;
pub use state::AppState;
