//! API-side authorization predicates.
//!
//! Checked at the handler boundary, before any store access. Both predicates
//! are pure: no IO, no panics.

use stockroom_core::{CustomerId, DomainError};

use crate::context::CallerContext;

/// Admin-only routes: the identity must carry the admin flag.
pub fn require_admin(ctx: &CallerContext) -> Result<(), DomainError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(DomainError::forbidden("admin access required"))
    }
}

/// Ownership predicate shared by Customer and Order routes: admins pass,
/// everyone else only for resources owned by their own id.
pub fn require_self_or_admin(ctx: &CallerContext, owner: CustomerId) -> Result<(), DomainError> {
    if ctx.is_admin() || ctx.user_id().as_uuid() == owner.as_uuid() {
        Ok(())
    } else {
        Err(DomainError::forbidden("access denied"))
    }
}
