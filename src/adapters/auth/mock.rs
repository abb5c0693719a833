//! Mock token verifier for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenVerifier;

/// Token verifier backed by a fixed token → user table.
#[derive(Clone, Default)]
pub struct MockTokenVerifier {
    users: Arc<Mutex<HashMap<String, AuthenticatedUser>>>,
}

impl MockTokenVerifier {
    /// Creates a verifier that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token as valid for the given user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.lock().unwrap().insert(token.into(), user);
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
