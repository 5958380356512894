//! Signed, time-bounded identity tokens.
//!
//! Verification is stateless: the token carries its own subject and expiry,
//! so no server-side session store exists and no revocation is possible
//! inside the validity window.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Fixed validity window for issued tokens. Policy constant, not
/// user-configurable.
pub const TOKEN_TTL: time::Duration = time::Duration::days(7);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 identity tokens against a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for `subject`, expiring [`TOKEN_TTL`] from now.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if claim serialization fails.
    pub fn issue(&self, subject: Uuid) -> Result<String, TokenError> {
        self.issue_with_expiry(subject, OffsetDateTime::now_utc() + TOKEN_TTL)
    }

    fn issue_with_expiry(
        &self,
        subject: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject,
            iat: OffsetDateTime::now_utc().unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` and return the subject it was issued for.
    ///
    /// # Errors
    /// - `TokenError::Malformed` when the token cannot be parsed
    /// - `TokenError::SignatureInvalid` when the signature does not match
    /// - `TokenError::Expired` when the embedded expiry has passed
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                _ => TokenError::Malformed,
            })?;
        Ok(data.claims.sub)
    }
}
