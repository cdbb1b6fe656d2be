//! Request-scoped authenticated identity.

use stockroom_core::UserId;

use crate::claims::Claims;

/// Decoded identity of the caller, derived from verified token claims.
///
/// Injected into request extensions by the auth gate; handlers read it for
/// role and ownership checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}
