//! Books REST API: CRUD over book records behind bearer-token
//! authentication, with an `OpenAPI` description of the surface.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;

pub use api::{AppState, create_router};
pub use config::{AppConfig, ConfigurationError};
