//! Redis-backed session store with per-key TTL.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{info, warn};

use super::{Session, SessionStore, StoreError};
use crate::config::RedisConfig;

/// Session store backed by an external Redis cache.
///
/// Each session is one key, `"{prefix}{token}"`, holding the JSON
/// encoded session with the TTL applied by Redis itself. Every command
/// is bounded by the configured timeout; an elapsed timeout surfaces as
/// the retryable [`StoreError::Timeout`].
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: String,
    timeout: Duration,
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

impl RedisSessionStore {
    /// Connect to Redis using the provided configuration.
    pub async fn connect(config: &RedisConfig) -> Result<Self, StoreError> {
        info!(prefix = %config.key_prefix, "Connecting to Redis session store");

        let client = redis::Client::open(config.url.as_str())?;
        let conn = tokio::time::timeout(config.command_timeout(), client.get_connection_manager())
            .await
            .map_err(|_| StoreError::Timeout)??;

        info!("Successfully connected to Redis");

        Ok(Self::from_manager(conn, config))
    }

    /// Wrap an existing connection manager.
    pub fn from_manager(conn: ConnectionManager, config: &RedisConfig) -> Self {
        Self {
            conn,
            key_prefix: config.key_prefix.clone(),
            timeout: config.command_timeout(),
        }
    }

    fn key(&self, token: &str) -> String {
        session_key(&self.key_prefix, token)
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "Redis command timed out");
                Err(StoreError::Timeout)
            }
        }
    }
}

fn session_key(prefix: &str, token: &str) -> String {
    format!("{prefix}{token}")
}

/// Redis rejects `EX 0`; clamp to the smallest valid expiry.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// `EXPIRE` takes a signed count; a negative one deletes the key.
fn expire_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl_secs(ttl)).unwrap_or(i64::MAX)
}

/// Translate a `PTTL` reply into an absolute expiry. Negative replies
/// mean "no expiry" (-1) or "no key" (-2).
fn expiry_from_pttl(pttl_ms: i64) -> Option<chrono::DateTime<Utc>> {
    if pttl_ms < 0 {
        return None;
    }
    Utc::now().checked_add_signed(TimeDelta::milliseconds(pttl_ms))
}

impl SessionStore for RedisSessionStore {
    async fn create(&self, session: Session, ttl: Duration) -> Result<(), StoreError> {
        let key = self.key(&session.token);
        let payload =
            serde_json::to_string(&session).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let mut conn = self.conn.clone();
        self.bounded("set_ex", async move {
            conn.set_ex::<_, _, ()>(key, payload, ttl_secs(ttl)).await
        })
        .await
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let key = self.key(token);
        let mut conn = self.conn.clone();
        let (payload, pttl): (Option<String>, i64) = self
            .bounded("get", async move {
                redis::pipe()
                    .get(&key)
                    .pttl(&key)
                    .query_async(&mut conn)
                    .await
            })
            .await?;

        let Some(payload) = payload else {
            return Ok(None);
        };
        let mut session: Session =
            serde_json::from_str(&payload).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        session.expires_at = expiry_from_pttl(pttl);
        Ok(Some(session))
    }

    async fn refresh_ttl(&self, token: &str, ttl: Duration) -> Result<bool, StoreError> {
        let key = self.key(token);
        let mut conn = self.conn.clone();
        self.bounded("expire", async move {
            conn.expire::<_, bool>(key, expire_secs(ttl)).await
        })
        .await
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        let key = self.key(token);
        let mut conn = self.conn.clone();
        self.bounded("del", async move { conn.del::<_, ()>(key).await })
            .await
    }
}
