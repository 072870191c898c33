//! In-process session store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::{Session, SessionStore, StoreError};

/// Session store held in process memory.
///
/// Backed by a sharded concurrent map: writers lock one shard at a
/// time and readers of other shards never block. Clones share the same
/// map.
///
/// Built with [`MemorySessionStore::new`] the store never expires
/// entries; tokens live until they are revoked. Built with
/// [`MemorySessionStore::with_expiry`] the TTL passed to `create` and
/// `refresh_ttl` is honored, expired entries are dropped lazily on
/// lookup, and [`MemorySessionStore::purge_expired`] sweeps the rest.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<DashMap<String, Session>>,
    expiring: bool,
}

fn deadline(now: DateTime<Utc>, ttl: Duration) -> Option<DateTime<Utc>> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
}

fn is_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at.is_some_and(|at| at <= now)
}

impl MemorySessionStore {
    /// A store whose sessions never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that honors session TTLs.
    pub fn with_expiry() -> Self {
        Self {
            inner: Arc::default(),
            expiring: true,
        }
    }

    /// Number of stored sessions, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every expired session and return how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.inner.retain(|_, session| {
            let keep = !is_expired(session, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!(removed, "Purged expired sessions");
        }
        removed
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, mut session: Session, ttl: Duration) -> Result<(), StoreError> {
        session.expires_at = if self.expiring {
            deadline(Utc::now(), ttl)
        } else {
            None
        };
        self.inner.insert(session.token.clone(), session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let now = Utc::now();
        // Clone out so the shard guard is released before any removal.
        let found = self.inner.get(token).map(|entry| entry.value().clone());
        match found {
            Some(session) if is_expired(&session, now) => {
                self.inner.remove_if(token, |_, s| is_expired(s, now));
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn refresh_ttl(&self, token: &str, ttl: Duration) -> Result<bool, StoreError> {
        let now = Utc::now();
        let Some(mut entry) = self.inner.get_mut(token) else {
            return Ok(false);
        };
        if is_expired(entry.value(), now) {
            drop(entry);
            self.inner.remove_if(token, |_, s| is_expired(s, now));
            return Ok(false);
        }
        if self.expiring {
            entry.expires_at = deadline(now, ttl);
        }
        Ok(true)
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        self.inner.remove(token);
        Ok(())
    }
}
