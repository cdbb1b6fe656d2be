//! Persisted user credential record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, UserId};

use crate::password;

/// A registered user.
///
/// # Invariants
/// - `username` is unique across the credential store (enforced at the
///   registration boundary, the store itself is schemaless).
/// - `password_hash` is always a salted argon2 hash, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record from registration input, hashing the password.
    ///
    /// New registrations never carry the admin flag; promotion is an
    /// operator concern outside the API surface.
    pub fn register(username: &str, plain_password: &str) -> Result<Self, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("username is required"));
        }
        if plain_password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        let password_hash = password::hash_password(plain_password)
            .map_err(|e| DomainError::store(e.to_string()))?;

        Ok(Self {
            id: UserId::new(),
            username: username.to_string(),
            password_hash,
            is_admin: false,
            created_at: Utc::now(),
        })
    }

    /// Check a login attempt against the stored hash.
    pub fn verify_password(&self, plain_password: &str) -> bool {
        password::verify_password(plain_password, &self.password_hash)
    }
}
