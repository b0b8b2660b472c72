//! Shared helpers for the endpoint tests.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use books_api::api::{AppState, create_router};
use books_api::auth::JwtVerifier;
use books_api::domain::{Book, BookFields, BookId};
use books_api::infrastructure::{BookRepository, InMemoryBookRepository, RepositoryError};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";
pub const PUBLIC_URL: &str = "http://books.test";

// =============================================================================
// Counting Repository
// =============================================================================

/// In-memory store that records how often it was touched.
#[derive(Clone, Default)]
pub struct CountingRepository {
    inner: InMemoryBookRepository,
    calls: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl BookRepository for CountingRepository {
    fn find_all(&self) -> BoxFuture<'static, Result<Vec<Book>, RepositoryError>> {
        self.touch();
        self.inner.find_all()
    }

    fn find_by_id(&self, id: BookId) -> BoxFuture<'static, Result<Option<Book>, RepositoryError>> {
        self.touch();
        self.inner.find_by_id(id)
    }

    fn create(&self, fields: BookFields) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        self.touch();
        self.inner.create(fields)
    }

    fn update(
        &self,
        id: BookId,
        fields: BookFields,
    ) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        self.touch();
        self.inner.update(id, fields)
    }

    fn delete(&self, id: BookId) -> BoxFuture<'static, Result<(), RepositoryError>> {
        self.touch();
        self.inner.delete(id)
    }
}

/// Store whose every operation fails.
pub struct BrokenRepository;

impl BookRepository for BrokenRepository {
    fn find_all(&self) -> BoxFuture<'static, Result<Vec<Book>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::DatabaseError("connection refused".to_string())) })
    }

    fn find_by_id(&self, _id: BookId) -> BoxFuture<'static, Result<Option<Book>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::DatabaseError("connection refused".to_string())) })
    }

    fn create(&self, _fields: BookFields) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::DatabaseError("connection refused".to_string())) })
    }

    fn update(
        &self,
        _id: BookId,
        _fields: BookFields,
    ) -> BoxFuture<'static, Result<Book, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::DatabaseError("connection refused".to_string())) })
    }

    fn delete(&self, _id: BookId) -> BoxFuture<'static, Result<(), RepositoryError>> {
        Box::pin(async { Err(RepositoryError::DatabaseError("connection refused".to_string())) })
    }
}

// =============================================================================
// Test Application
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub repository: CountingRepository,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = CountingRepository::default();
        let state = AppState::new(
            Arc::new(repository.clone()),
            Arc::new(JwtVerifier::from_secret(SECRET.as_bytes())),
            PUBLIC_URL,
        );
        Self {
            router: create_router(state),
            repository,
        }
    }

    pub fn with_repository(repository: Arc<dyn BookRepository>) -> Self {
        let state = AppState::new(
            repository,
            Arc::new(JwtVerifier::from_secret(SECRET.as_bytes())),
            PUBLIC_URL,
        );
        Self {
            router: create_router(state),
            repository: CountingRepository::default(),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

// =============================================================================
// Tokens
// =============================================================================

pub fn token() -> String {
    sign(&json!({ "id": 1, "username": "reader" }), SECRET)
}

pub fn sign(claims: &Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn dune() -> Value {
    json!({ "title": "Dune", "author": "Frank Herbert", "publishedYear": 1965 })
}
