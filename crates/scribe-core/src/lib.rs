//! Scribe Core: domain models, error taxonomy, and repository traits
//! shared by every Scribe crate.

pub mod error;
pub mod models;
pub mod repository;
