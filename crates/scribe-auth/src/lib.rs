//! Scribe Auth: password verification, opaque session tokens backed by
//! a pluggable session store, and the ownership policy that gates
//! mutations.

pub mod config;
pub mod error;
pub mod password;
pub mod policy;
pub mod service;
pub mod store;
pub mod token;

pub use config::{AuthConfig, RedisConfig};
pub use error::AuthError;
pub use policy::{authorize_mutation, can_mutate};
pub use service::{AuthService, LoginInput, LoginOutput};
pub use store::memory::MemorySessionStore;
pub use store::redis::RedisSessionStore;
pub use store::{Session, SessionStore, StoreError};
