//! HS256 JWT implementation of `TokenVerifier`.
//!
//! Validates tokens signed with a shared secret. Issuance happens in an
//! external identity service; this adapter only checks the signature and
//! expiry and extracts the subject.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenVerifier;

/// Claims this service reads from a token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    name: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Shared-secret JWT verifier.
pub struct Hs256TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    /// Creates a verifier over the shared secret.
    pub fn new(secret: &Secret<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl TokenVerifier for Hs256TokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let subject = data.claims.sub.ok_or(AuthError::MissingSubject)?;
        let id = UserId::new(subject).map_err(|_| AuthError::MissingSubject)?;
        Ok(AuthenticatedUser::new(id, data.claims.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: Option<String>,
        name: Option<String>,
        exp: usize,
    }

    fn secret() -> Secret<String> {
        Secret::new("a-very-secret-key".to_string())
    }

    fn sign(claims: &TestClaims, key: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_user() {
        let verifier = Hs256TokenVerifier::new(&secret());
        let token = sign(
            &TestClaims {
                sub: Some("alice".to_string()),
                name: Some("Alice".to_string()),
                exp: future_exp(),
            },
            "a-very-secret-key",
        );

        let user = verifier.verify(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "alice");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let verifier = Hs256TokenVerifier::new(&secret());
        let token = sign(
            &TestClaims {
                sub: Some("alice".to_string()),
                name: None,
                exp: future_exp(),
            },
            "some-other-key",
        );

        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let verifier = Hs256TokenVerifier::new(&secret());
        let token = sign(
            &TestClaims {
                sub: Some("alice".to_string()),
                name: None,
                exp: (chrono::Utc::now().timestamp() - 3600) as usize,
            },
            "a-very-secret-key",
        );

        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn missing_subject_is_rejected() {
        let verifier = Hs256TokenVerifier::new(&secret());
        let token = sign(
            &TestClaims {
                sub: None,
                name: None,
                exp: future_exp(),
            },
            "a-very-secret-key",
        );

        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::MissingSubject)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let verifier = Hs256TokenVerifier::new(&secret());
        assert!(matches!(
            verifier.verify("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
