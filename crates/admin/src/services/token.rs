//! Bearer tokens issued on successful admin login.
//!
//! Tokens are HS256 JWTs carrying the admin id and role. Signing is delegated
//! entirely to `jsonwebtoken`.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use branchdesk_core::{AdminId, Role};

/// Errors from issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing the claims failed.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    /// The token is malformed, expired, or signed with another key.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Identity a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: AdminId,
    pub role: Role,
}

/// Produces opaque bearer tokens for verified identities.
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `subject`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the token cannot be produced.
    fn issue(&self, subject: TokenSubject) -> Result<String, TokenError>;
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id as a string, per the JWT `sub` convention.
    pub sub: String,
    pub id: AdminId,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

/// HMAC-SHA256 JWT issuer.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtTokenIssuer {
    /// Create an issuer signing with `secret`; tokens expire after `ttl`.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let key = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            ttl,
        }
    }

    /// Decode and validate a token issued by this issuer.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for bad signatures, malformed tokens and
    /// expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: TokenSubject) -> Result<String, TokenError> {
        let iat = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        let claims = Claims {
            sub: subject.id.to_string(),
            id: subject.id,
            role: subject.role,
            iat,
            exp: iat.saturating_add(self.ttl.as_secs()),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)
    }
}
