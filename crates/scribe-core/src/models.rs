//! Domain models for Scribe.
//!
//! These are the core types shared across all crates.

pub mod account;
pub mod comment;
pub mod post;

/// A record with a recorded owner.
///
/// Mutating operations on an `Owned` record are only permitted to the
/// principal whose name matches [`Owned::owner`].
pub trait Owned {
    /// Name of the owning account, `None` if the record has no owner.
    fn owner(&self) -> Option<&str>;
}
