//! Scribe Database: record stores for accounts, posts and comments.
//!
//! This crate provides:
//! - In-process repositories ([`memory`]) for single-node deployments
//!   and tests
//! - SurrealDB connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - SurrealDB repositories ([`repository`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod memory;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
