//! Error types for the Scribe system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Session store unavailable: {reason}")]
    StoreUnavailable { reason: String, retryable: bool },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScribeError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// HTTP-equivalent status code a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::AlreadyExists { .. } | Self::Validation { .. } => 400,
            Self::AuthenticationFailed { .. } => 401,
            Self::AuthorizationDenied { .. } => 403,
            Self::StoreUnavailable { .. } => 503,
            Self::Database(_) | Self::Crypto(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether retrying the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable {
                retryable: true,
                ..
            }
        )
    }
}

pub type ScribeResult<T> = Result<T, ScribeError>;
