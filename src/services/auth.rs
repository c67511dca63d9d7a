use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while establishing the caller's identity
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token carries no subject claim")]
    MissingSubject,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
}

/// Verifies bearer tokens issued by the identity provider
///
/// Tokens are HS256 JWTs signed with a shared secret. Verification is
/// local: signature and expiry are checked, then the `sub` claim becomes
/// the caller's user id. No other work happens before this succeeds.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Resolve the caller's user id from an Authorization header value
    pub fn user_id_from_header(&self, header: Option<&str>) -> Result<String, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        self.user_id_from_token(token)
    }

    /// Verify a raw token and extract its subject
    pub fn user_id_from_token(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;

        data.claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(
            &serde_json::json!({ "sub": "user_42", "exp": future_exp() }),
            SECRET,
        );

        let user_id = verifier
            .user_id_from_header(Some(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(user_id, "user_42");
    }

    #[test]
    fn test_missing_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.user_id_from_header(None),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.user_id_from_header(Some("Basic abc123")),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(
            &serde_json::json!({ "sub": "user_42", "exp": future_exp() }),
            "other-secret",
        );

        assert!(matches!(
            verifier.user_id_from_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let expired = chrono::Utc::now().timestamp() - 3600;
        let token = sign(&serde_json::json!({ "sub": "user_42", "exp": expired }), SECRET);

        assert!(matches!(
            verifier.user_id_from_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_missing_subject_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&serde_json::json!({ "exp": future_exp() }), SECRET);

        assert!(matches!(
            verifier.user_id_from_token(&token),
            Err(AuthError::MissingSubject)
        ));
    }
}
