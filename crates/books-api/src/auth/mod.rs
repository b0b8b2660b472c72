//! Bearer-credential authentication for the book routes.
//!
//! - [`verifier`]: transport-independent credential checks (`JwtVerifier`)
//! - [`layer`]: the tower middleware that gates requests on those checks

pub mod layer;
pub mod verifier;

pub use layer::{AuthLayer, AuthService, authenticate};
pub use verifier::{AuthError, CredentialVerifier, Identity, JwtVerifier, extract_bearer};
