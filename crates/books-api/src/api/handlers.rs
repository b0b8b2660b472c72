use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use super::dto::{BookPayload, HealthResponse, MessageResponse};
use super::error::ApiError;
use super::state::AppState;
use crate::auth::Identity;
use crate::domain::{Book, BookFields, BookId};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Any path segment that is not an integer names no record.
fn parse_id(raw: &str) -> Result<BookId, ApiError> {
    raw.parse::<BookId>().map_err(|_| ApiError::book_not_found(raw))
}

fn validated(payload: Result<Json<BookPayload>, JsonRejection>) -> Result<BookFields, ApiError> {
    let Json(payload) = payload?;
    payload.validate()
}

// =============================================================================
// Book Handlers
// =============================================================================

pub async fn list_books(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.repository.find_all().await?;
    tracing::debug!(subject = identity.subject(), count = books.len(), "Listed books");
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&raw_id)?;

    let book = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::book_not_found(id.to_string()))?;

    tracing::debug!(subject = identity.subject(), %id, "Fetched book");
    Ok(Json(book))
}

pub async fn create_book(
    State(state): State<AppState>,
    identity: Identity,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let fields = validated(payload)?;

    let book = state.repository.create(fields).await?;

    tracing::info!(subject = identity.subject(), id = %book.id, "Created book");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    identity: Identity,
    Path(raw_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&raw_id)?;
    let fields = validated(payload)?;

    let book = state.repository.update(id, fields).await?;

    tracing::info!(subject = identity.subject(), %id, "Updated book");
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    state.repository.delete(id).await?;

    tracing::info!(subject = identity.subject(), %id, "Deleted book");
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}

// =============================================================================
// Public Handlers
// =============================================================================

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

pub async fn api_description(State(state): State<AppState>) -> Json<Value> {
    Json(Value::clone(&state.api_description))
}

// =============================================================================
// Tests
// =============================================================================
