//! Signed bearer token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use thiserror::Error;

use crate::claims::Claims;
use crate::user::User;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token is not valid")]
    Invalid,
}

/// HS256 token service.
///
/// The signing secret is process-wide configuration resolved once at startup;
/// the service never re-reads it.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a signed token for a user, expiring after the configured TTL.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed, expired, and badly-signed tokens all collapse into
    /// [`TokenError::Invalid`]; callers reject the request with an
    /// authentication error.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data: TokenData<Claims> = decode(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }
}
