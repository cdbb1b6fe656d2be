//! Bearer token claims model (transport-agnostic).

use serde::{Deserialize, Serialize};

use stockroom_core::UserId;

/// Claims carried by a signed bearer token.
///
/// This is the minimal set of claims the API expects once a token has been
/// decoded and its signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the authenticated user's id.
    pub sub: UserId,

    /// Username at issue time (display/logging only, not re-validated).
    pub username: String,

    /// Whether the subject holds the admin role.
    pub is_admin: bool,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,
}
