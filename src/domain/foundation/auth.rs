//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a bearer token.
//! They have no provider dependencies; any token scheme can populate them via
//! the `TokenVerifier` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
///
/// The core treats the identity as an opaque input constant and never
/// validates it beyond what the verifier already did.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Display name if the token carried one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }

    /// Returns the display name, falling back to the raw identifier.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token signature or structure is invalid.
    #[error("invalid token")]
    InvalidToken,

    /// The token has expired.
    #[error("token expired")]
    TokenExpired,

    /// The token is valid but carries no usable subject.
    #[error("token missing subject claim")]
    MissingSubject,

    /// The verifier itself failed (misconfiguration, backend down).
    #[error("auth service unavailable: {0}")]
    ServiceUnavailable(String),
}
