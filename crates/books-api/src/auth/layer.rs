use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use super::verifier::{AuthError, CredentialVerifier, Identity, extract_bearer};
use crate::api::error::ApiError;

/// Verifies the bearer credential carried by `headers`.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredential`] when there is no `Authorization`
/// header, otherwise the error of [`extract_bearer`] or the verifier.
pub fn authenticate(
    verifier: &dyn CredentialVerifier,
    headers: &HeaderMap,
) -> Result<Identity, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    verifier.verify(extract_bearer(value)?)
}

// =============================================================================
// Identity Extractor
// =============================================================================

impl<State> FromRequestParts<State> for Identity
where
    State: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &State) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Identity not found. Ensure AuthLayer is applied."))
    }
}

// =============================================================================
// AuthLayer
// =============================================================================

#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthLayer {
    #[must_use]
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

impl<Service> Layer<Service> for AuthLayer {
    type Service = AuthService<Service>;

    fn layer(&self, inner: Service) -> Self::Service {
        AuthService {
            inner,
            verifier: Arc::clone(&self.verifier),
        }
    }
}

// =============================================================================
// AuthService
// =============================================================================

/// Rejects requests without a valid bearer credential before they reach
/// `inner`.
#[derive(Clone)]
pub struct AuthService<Service> {
    inner: Service,
    verifier: Arc<dyn CredentialVerifier>,
}

impl<InnerService, RequestBody> Service<Request<RequestBody>> for AuthService<InnerService>
where
    InnerService: Service<Request<RequestBody>, Response = Response> + Clone + Send + 'static,
    InnerService::Future: Send,
    RequestBody: Send + 'static,
{
    type Response = Response;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request<RequestBody>) -> Self::Future {
        match authenticate(self.verifier.as_ref(), request.headers()) {
            Ok(identity) => {
                tracing::debug!(subject = identity.subject(), "Request authenticated");
                request.extensions_mut().insert(identity);

                // The ready clone is the one that must serve this call.
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);

                Box::pin(async move { inner.call(request).await })
            }
            Err(error) => {
                tracing::warn!(
                    method = %request.method(),
                    uri = %request.uri(),
                    %error,
                    "Rejected unauthenticated request"
                );
                let response = ApiError::from(error).into_response();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
