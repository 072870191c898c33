//! SurrealDB implementation of [`AccountRepository`].
//!
//! Accounts are keyed by name (`account:<name>`); the email carries a
//! unique index.

use chrono::{DateTime, Utc};
use scribe_core::error::ScribeResult;
use scribe_core::models::account::{Account, CreateAccount, UpdateAccount};
use scribe_core::repository::{AccountRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AccountRow {
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Account repository.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateAccount) -> ScribeResult<Account> {
        let name = input.name.clone();

        let result = self
            .db
            .query(
                "CREATE type::record('account', $name) SET \
                 name = $name, email = $email, \
                 password_hash = $password_hash",
            )
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("account", e.to_string()))?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: name,
        })?;

        Ok(row.into())
    }

    async fn find_by_name(&self, name: &str) -> ScribeResult<Option<Account>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('account', $name)")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(Account::from))
    }

    async fn update(&self, name: &str, input: UpdateAccount) -> ScribeResult<Account> {
        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.password_hash.is_some() {
            sets.push("password_hash = $password_hash");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('account', $name) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("name", name.to_string()));
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(password_hash) = input.password_hash {
            builder = builder.bind(("password_hash", password_hash));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("account", e.to_string()))?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: name.to_string(),
        })?;

        Ok(row.into())
    }

    async fn delete(&self, name: &str) -> ScribeResult<()> {
        let mut result = self
            .db
            .query("DELETE type::record('account', $name) RETURN BEFORE")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "account".into(),
                id: name.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> ScribeResult<PaginatedResult<Account>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM account GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT * FROM account \
                 ORDER BY created_at ASC, name ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;

        Ok(PaginatedResult {
            items: rows.into_iter().map(Account::from).collect(),
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
