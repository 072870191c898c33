//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Owned;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The identity attached to requests authenticated as this account.
    pub fn principal(&self) -> Principal {
        Principal {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl Owned for Account {
    fn owner(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

/// Authenticated identity resolved from a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    /// Already hashed; repositories never see plaintext passwords.
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
