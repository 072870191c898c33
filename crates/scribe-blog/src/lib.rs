//! Scribe Blog: account, post and comment operations.
//!
//! Every mutating operation takes the authenticated [`Principal`]
//! explicitly and is gated by the ownership policy from `scribe-auth`.
//!
//! [`Principal`]: scribe_core::models::account::Principal

pub mod input;
pub mod service;
pub mod validate;

pub use input::{NewAccountInput, NewCommentInput, PostInput, UpdateAccountInput, UpdateCommentInput};
pub use service::BlogService;
