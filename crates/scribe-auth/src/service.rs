//! Authentication service: login, per-request authentication and
//! logout orchestration.

use scribe_core::models::account::Principal;
use scribe_core::repository::AccountRepository;
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::store::{Session, SessionStore};
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub name: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Opaque session token to present on subsequent requests.
    pub token: String,
    pub principal: Principal,
    /// Session lifetime in seconds, for stores that expire sessions.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the account lookup and the session store so the same
/// token lifecycle runs unchanged on every backend combination.
pub struct AuthService<A: AccountRepository, S: SessionStore> {
    accounts: A,
    sessions: S,
    config: AuthConfig,
}

impl<A: AccountRepository, S: SessionStore> AuthService<A, S> {
    pub fn new(accounts: A, sessions: S, config: AuthConfig) -> Self {
        Self {
            accounts,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Verify name + password and open a new session.
    ///
    /// Every call yields a fresh, independent token. An unknown account
    /// and a wrong password both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutput, AuthError> {
        // 1. Look up the account.
        let Some(account) = self
            .accounts
            .find_by_name(&input.name)
            .await
            .map_err(AuthError::Lookup)?
        else {
            debug!(name = %input.name, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &account.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            debug!(name = %input.name, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Mint a token and store the session.
        let principal = account.principal();
        let token = token::generate_session_token();
        self.sessions
            .create(
                Session::new(token.clone(), principal.clone(), account.created_at),
                self.config.session_ttl(),
            )
            .await?;

        info!(name = %principal.name, "Session opened");

        Ok(LoginOutput {
            token,
            principal,
            expires_in: self.config.session_ttl_secs,
        })
    }

    /// Resolve a token to the principal it was issued for.
    ///
    /// The account is re-read on every call: if it no longer exists, or
    /// the name now belongs to a newer account, the session is deleted
    /// and the token rejected. On success the
    /// session's expiry slides forward when `sliding_expiry` is set.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        if !token::is_well_formed(token) {
            return Err(AuthError::InvalidToken);
        }

        let Some(session) = self.sessions.get(token).await? else {
            debug!("Unknown or expired token");
            return Err(AuthError::InvalidToken);
        };

        let account = self
            .accounts
            .find_by_name(&session.principal.name)
            .await
            .map_err(AuthError::Lookup)?;
        let Some(account) = account.filter(|a| a.created_at == session.account_created_at)
        else {
            info!(name = %session.principal.name, "Account gone, dropping session");
            self.sessions.delete(token).await?;
            return Err(AuthError::InvalidToken);
        };

        if self.config.sliding_expiry
            && !self
                .sessions
                .refresh_ttl(token, self.config.session_ttl())
                .await?
        {
            // Expired or revoked between the lookup and the refresh.
            return Err(AuthError::InvalidToken);
        }

        Ok(account.principal())
    }

    /// Revoke a token. Revoking an unknown token succeeds.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.delete(token).await?;
        debug!("Session closed");
        Ok(())
    }
}
