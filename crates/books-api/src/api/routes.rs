//! Routing definitions for the books API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;
use crate::auth::AuthLayer;

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the application router.
///
/// Every `/api/books` route sits behind [`AuthLayer`]; `/health` and
/// `/api-docs/openapi.json` are public.
pub fn create_router(state: AppState) -> Router {
    let books = Router::new()
        .route(
            "/api/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/api/books/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route_layer(AuthLayer::new(Arc::clone(&state.verifier)));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(handlers::api_description))
        .merge(books)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
