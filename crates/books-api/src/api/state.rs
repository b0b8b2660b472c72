use std::sync::Arc;

use serde_json::Value;

use super::openapi;
use crate::auth::CredentialVerifier;
use crate::infrastructure::BookRepository;

// =============================================================================
// AppState
// =============================================================================

/// Shared dependencies of every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn BookRepository>,

    pub verifier: Arc<dyn CredentialVerifier>,

    /// Pre-rendered `OpenAPI` document.
    pub api_description: Arc<Value>,
}

impl AppState {
    #[must_use]
    pub fn new(
        repository: Arc<dyn BookRepository>,
        verifier: Arc<dyn CredentialVerifier>,
        public_url: &str,
    ) -> Self {
        Self {
            repository,
            verifier,
            api_description: Arc::new(openapi::document(public_url)),
        }
    }
}
