//! Credential verification, independent of the HTTP transport.
//!
//! A [`CredentialVerifier`] turns an opaque bearer credential into an
//! [`Identity`] or an [`AuthError`]. The HTTP side only extracts the
//! credential from the `Authorization` header and hands it over.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

// =============================================================================
// AuthError
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access denied: no bearer credential provided")]
    MissingCredential,

    #[error("Access denied: authorization header is not a bearer credential")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidCredential(String),
}

// =============================================================================
// Identity
// =============================================================================

/// The decoded holder of a valid credential.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    subject: String,
    claims: Map<String, Value>,
}

impl Identity {
    #[must_use]
    pub fn new(subject: impl Into<String>, claims: Map<String, Value>) -> Self {
        Self {
            subject: subject.into(),
            claims,
        }
    }

    /// Derives the subject from `sub`, falling back to `id` and `username`.
    #[must_use]
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        let subject = ["sub", "id", "username"]
            .iter()
            .find_map(|key| match claims.get(*key) {
                Some(Value::String(text)) => Some(text.clone()),
                Some(Value::Number(number)) => Some(number.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "anonymous".to_string());
        Self { subject, claims }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}

// =============================================================================
// CredentialVerifier
// =============================================================================

/// Validates a bearer credential.
pub trait CredentialVerifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] when the credential is rejected.
    fn verify(&self, credential: &str) -> Result<Identity, AuthError>;
}

/// Splits a raw `Authorization` header value into its bearer credential.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
///
/// Returns [`AuthError::MalformedHeader`] for another scheme or an empty token.
pub fn extract_bearer(header_value: &str) -> Result<&str, AuthError> {
    let (scheme, credential) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    let credential = credential.trim();
    if credential.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(credential)
}

// =============================================================================
// JwtVerifier
// =============================================================================

/// HS256 JSON Web Token verifier sharing a secret with the token issuer.
///
/// `exp` is checked when the token carries it but is not required. `aud`
/// is never checked.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, credential: &str) -> Result<Identity, AuthError> {
        jsonwebtoken::decode::<Map<String, Value>>(credential, &self.key, &self.validation)
            .map(|data| Identity::from_claims(data.claims))
            .map_err(|error| AuthError::InvalidCredential(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
