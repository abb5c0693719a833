//! Token verification port.
//!
//! Keeps the HTTP middleware provider-agnostic: whether tokens come from an
//! HS256 secret or a mock for tests, the middleware doesn't change. Token
//! issuance is out of scope; this port only validates.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for validating bearer tokens into an authenticated user.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validates a bearer token and extracts the user identity.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
