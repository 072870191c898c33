//! Ownership policy for mutating operations.
//!
//! Updates and deletes of posts, comments and accounts are permitted
//! only to the principal recorded as the resource's owner. Reads never
//! consult this policy.

use scribe_core::models::Owned;
use scribe_core::models::account::Principal;

use crate::error::AuthError;

/// Whether `principal` may update or delete a resource owned by
/// `owner`. A missing or empty owner denies everyone.
pub fn can_mutate(principal: &Principal, owner: Option<&str>) -> bool {
    match owner {
        Some(owner) if !owner.is_empty() => owner == principal.name,
        _ => false,
    }
}

/// [`can_mutate`] as a guard: `Err(AuthError::Forbidden)` when denied.
pub fn authorize_mutation<R: Owned + ?Sized>(
    principal: &Principal,
    resource: &R,
) -> Result<(), AuthError> {
    if can_mutate(principal, resource.owner()) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
