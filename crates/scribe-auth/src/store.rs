//! Session store abstraction.
//!
//! A session store exclusively owns the `token -> session` mapping.
//! Two implementations ship with this crate: [`memory::MemorySessionStore`]
//! (in-process, optionally expiring) and [`redis::RedisSessionStore`]
//! (external cache with per-key TTL).

pub mod memory;
pub mod redis;

use std::time::Duration;

use chrono::{DateTime, Utc};
use scribe_core::models::account::Principal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A live session: the principal a token resolves to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub principal: Principal,
    /// Creation time of the account the token was issued for. A later
    /// account under the same name has a different one.
    pub account_created_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    /// `None` for stores that never expire entries.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: String, principal: Principal, account_created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            principal,
            account_created_at,
            issued_at: Utc::now(),
            expires_at: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend did not answer in time; the caller may retry.
    #[error("session store timed out")]
    Timeout,

    #[error("session store backend error: {0}")]
    Backend(String),

    #[error("corrupt session record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Timeout)
    }
}

pub trait SessionStore: Send + Sync {
    /// Insert a session. An existing entry under the same token is
    /// overwritten.
    fn create(
        &self,
        session: Session,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Look up a token. Absent and expired tokens are `Ok(None)`.
    fn get(&self, token: &str) -> impl Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Push the expiry of a live session to `now + ttl`. Returns `false`
    /// if the token is absent.
    fn refresh_ttl(
        &self,
        token: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Remove a token. Removing an absent token is a no-op.
    fn delete(&self, token: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
