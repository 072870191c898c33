//! Authentication and session store configuration.

use std::env;
use std::time::Duration;

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime in seconds (default: 3600 = 1 hour). Ignored by
    /// stores that never expire entries.
    pub session_ttl_secs: u64,
    /// Push the expiry forward on every successful authentication.
    pub sliding_expiry: bool,
    /// Optional pepper prepended to passwords before Argon2id hashing
    /// and verification.
    pub pepper: Option<String>,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 3600,
            sliding_expiry: true,
            pepper: None,
            min_password_length: 6,
        }
    }
}

impl AuthConfig {
    /// Read overrides from `SESSION_TTL_SECS`, `SESSION_SLIDING_EXPIRY`
    /// and `PASSWORD_PEPPER`; anything unset or unparsable keeps its
    /// default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable
    /// source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(ttl) = parse_var(&var, "SESSION_TTL_SECS") {
            config.session_ttl_secs = ttl;
        }
        if let Some(sliding) = parse_var(&var, "SESSION_SLIDING_EXPIRY") {
            config.sliding_expiry = sliding;
        }
        config.pepper = var("PASSWORD_PEPPER").filter(|p| !p.is_empty());
        config
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Connection settings for the Redis session store.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Connection URL (e.g., `redis://:password@127.0.0.1:6379/0`).
    pub url: String,
    /// Prefix prepended to every session key.
    pub key_prefix: String,
    /// Upper bound on a single Redis command, in milliseconds.
    pub command_timeout_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".into(),
            key_prefix: "session:".into(),
            command_timeout_ms: 2000,
        }
    }
}

impl RedisConfig {
    /// Build the URL from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`
    /// and `REDIS_DB`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let host = var("REDIS_HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port: u16 = parse_var(&var, "REDIS_PORT").unwrap_or(6379);
        let db: u32 = parse_var(&var, "REDIS_DB").unwrap_or(0);
        let password = var("REDIS_PASSWORD").unwrap_or_default();

        Self {
            url: redis_url(&host, port, &password, db),
            ..Self::default()
        }
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

fn redis_url(host: &str, port: u16, password: &str, db: u32) -> String {
    if password.is_empty() {
        format!("redis://{host}:{port}/{db}")
    } else {
        format!("redis://:{password}@{host}:{port}/{db}")
    }
}

fn parse_var<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    var(key)?.trim().parse().ok()
}
