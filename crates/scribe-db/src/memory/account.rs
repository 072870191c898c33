//! In-process implementation of [`AccountRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use scribe_core::error::ScribeResult;
use scribe_core::models::account::{Account, CreateAccount, UpdateAccount};
use scribe_core::repository::{AccountRepository, PaginatedResult, Pagination};

use crate::error::DbError;

/// Accounts keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(accounts: &HashMap<String, Account>, email: &str, except: &str) -> bool {
    accounts
        .values()
        .any(|a| a.email == email && a.name != except)
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, input: CreateAccount) -> ScribeResult<Account> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&input.name) || email_taken(&accounts, &input.email, "") {
            return Err(DbError::AlreadyExists {
                entity: "account".into(),
            }
            .into());
        }

        let now = Utc::now();
        let account = Account {
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(account.name.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_name(&self, name: &str) -> ScribeResult<Option<Account>> {
        Ok(self.accounts.read().get(name).cloned())
    }

    async fn update(&self, name: &str, input: UpdateAccount) -> ScribeResult<Account> {
        let mut accounts = self.accounts.write();
        if let Some(email) = &input.email
            && email_taken(&accounts, email, name)
        {
            return Err(DbError::AlreadyExists {
                entity: "account".into(),
            }
            .into());
        }

        let account = accounts.get_mut(name).ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: name.to_string(),
        })?;
        if let Some(email) = input.email {
            account.email = email;
        }
        if let Some(password_hash) = input.password_hash {
            account.password_hash = password_hash;
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn delete(&self, name: &str) -> ScribeResult<()> {
        self.accounts
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| {
                DbError::NotFound {
                    entity: "account".into(),
                    id: name.to_string(),
                }
                .into()
            })
    }

    async fn list(&self, pagination: Pagination) -> ScribeResult<PaginatedResult<Account>> {
        let mut all: Vec<Account> = self.accounts.read().values().cloned().collect();
        all.sort_by(|a, b| (a.created_at, &a.name).cmp(&(b.created_at, &b.name)));
        Ok(PaginatedResult::from_ordered(all, &pagination))
    }
}
