//! SurrealDB connection setup and repository wiring.

use std::env;

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;
use crate::repository::{
    SurrealAccountRepository, SurrealCommentRepository, SurrealPostRepository,
};
use crate::schema::run_migrations;

/// Where the blog records live and how to sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// WebSocket endpoint, `host:port`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "scribe".into(),
            database: "blog".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Read `SURREAL_URL`, `SURREAL_NAMESPACE`, `SURREAL_DATABASE`,
    /// `SURREAL_USER` and `SURREAL_PASSWORD`; unset or empty values keep
    /// their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            var(key).filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
        };
        Self {
            url: pick("SURREAL_URL", defaults.url),
            namespace: pick("SURREAL_NAMESPACE", defaults.namespace),
            database: pick("SURREAL_DATABASE", defaults.database),
            username: pick("SURREAL_USER", defaults.username),
            password: pick("SURREAL_PASSWORD", defaults.password),
        }
    }
}

/// A migrated database handle that hands out repositories sharing it.
#[derive(Clone)]
pub struct DbManager<C: Connection> {
    db: Surreal<C>,
}

impl DbManager<Client> {
    /// Sign in to a remote server, select the blog namespace and bring
    /// the schema up to date.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Opening record store"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Self::open(db).await
    }
}

impl<C: Connection> DbManager<C> {
    /// Wrap an already selected database, applying pending migrations.
    pub async fn open(db: Surreal<C>) -> Result<Self, DbError> {
        run_migrations(&db).await?;
        Ok(Self { db })
    }

    pub fn client(&self) -> &Surreal<C> {
        &self.db
    }

    pub fn accounts(&self) -> SurrealAccountRepository<C> {
        SurrealAccountRepository::new(self.db.clone())
    }

    pub fn posts(&self) -> SurrealPostRepository<C> {
        SurrealPostRepository::new(self.db.clone())
    }

    pub fn comments(&self) -> SurrealCommentRepository<C> {
        SurrealCommentRepository::new(self.db.clone())
    }
}
