//! Opaque session token generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of every issued session token.
pub const TOKEN_LENGTH: usize = 32;

/// Generate a random session token: [`TOKEN_LENGTH`] characters from
/// `[A-Za-z0-9]`, drawn from the thread-local CSPRNG.
pub fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Cheap shape check used to reject garbage before touching the store.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
