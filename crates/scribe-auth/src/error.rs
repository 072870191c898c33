//! Authentication error types.

use scribe_core::error::ScribeError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown account or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Absent, expired, revoked, or orphaned token.
    #[error("invalid token")]
    InvalidToken,

    #[error("principal does not own this resource")]
    Forbidden,

    #[error("session store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Lookup(ScribeError),
}

impl From<AuthError> for ScribeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                ScribeError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::Forbidden => ScribeError::AuthorizationDenied {
                reason: err.to_string(),
            },
            AuthError::StoreUnavailable(store) => ScribeError::StoreUnavailable {
                retryable: store.is_retryable(),
                reason: store.to_string(),
            },
            AuthError::Hashing(msg) | AuthError::Crypto(msg) => ScribeError::Crypto(msg),
            AuthError::Lookup(inner) => inner,
        }
    }
}
