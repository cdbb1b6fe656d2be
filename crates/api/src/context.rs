use stockroom_auth::Identity;
use stockroom_core::UserId;

/// Caller context for a request (authenticated identity).
///
/// This is immutable and present for every route behind the auth gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    identity: Identity,
}

impl CallerContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.identity.is_admin
    }
}
