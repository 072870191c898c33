//! Integration tests for the authentication service.

use std::time::Duration;

use scribe_auth::config::AuthConfig;
use scribe_auth::error::AuthError;
use scribe_auth::password;
use scribe_auth::service::{AuthService, LoginInput};
use scribe_auth::store::memory::MemorySessionStore;
use scribe_auth::store::{Session, SessionStore, StoreError};
use scribe_auth::token::generate_session_token;
use scribe_core::error::ScribeError;
use scribe_core::models::account::{CreateAccount, UpdateAccount};
use scribe_core::repository::AccountRepository;
use scribe_db::memory::MemoryAccountRepository;

/// Create an account store holding `alice` / `secret1`.
async fn setup() -> MemoryAccountRepository {
    let accounts = MemoryAccountRepository::new();
    register(&accounts, "alice", "secret1").await;
    accounts
}

async fn register(accounts: &MemoryAccountRepository, name: &str, pass: &str) {
    accounts
        .create(CreateAccount {
            name: name.into(),
            email: format!("{name}@example.com"),
            password_hash: password::hash_password(pass, None).unwrap(),
        })
        .await
        .unwrap();
}

fn login(name: &str, pass: &str) -> LoginInput {
    LoginInput {
        name: name.into(),
        password: pass.into(),
    }
}

#[tokio::test]
async fn login_then_authenticate_returns_principal() {
    let accounts = setup().await;
    let svc = AuthService::new(accounts, MemorySessionStore::new(), AuthConfig::default());

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    assert_eq!(out.token.len(), 32);
    assert!(out.token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(out.principal.name, "alice");
    assert_eq!(out.expires_in, 3600);

    let principal = svc.authenticate(&out.token).await.unwrap();
    assert_eq!(principal.name, "alice");
    assert_eq!(principal.email, "alice@example.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_account_are_indistinguishable() {
    let accounts = setup().await;
    let svc = AuthService::new(accounts, MemorySessionStore::new(), AuthConfig::default());

    let wrong = svc.login(login("alice", "wrongpass")).await.unwrap_err();
    let unknown = svc.login(login("nobody", "secret1")).await.unwrap_err();

    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert!(svc.sessions().is_empty());

    let err: ScribeError = wrong.into();
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn tokens_never_issued_are_rejected() {
    let accounts = setup().await;
    let svc = AuthService::new(accounts, MemorySessionStore::new(), AuthConfig::default());
    svc.login(login("alice", "secret1")).await.unwrap();

    for token in [generate_session_token(), String::new(), "garbage".into()] {
        assert!(matches!(
            svc.authenticate(&token).await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }
}

#[tokio::test]
async fn logout_revokes_and_is_idempotent() {
    let accounts = setup().await;
    let svc = AuthService::new(accounts, MemorySessionStore::new(), AuthConfig::default());

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    svc.logout(&out.token).await.unwrap();
    assert!(matches!(
        svc.authenticate(&out.token).await.unwrap_err(),
        AuthError::InvalidToken
    ));

    svc.logout(&out.token).await.unwrap();
    svc.logout("never-issued").await.unwrap();
}

#[tokio::test]
async fn two_logins_yield_independent_tokens() {
    let accounts = setup().await;
    let svc = AuthService::new(accounts, MemorySessionStore::new(), AuthConfig::default());

    let first = svc.login(login("alice", "secret1")).await.unwrap();
    let second = svc.login(login("alice", "secret1")).await.unwrap();
    assert_ne!(first.token, second.token);

    svc.logout(&first.token).await.unwrap();
    assert!(svc.authenticate(&first.token).await.is_err());
    assert_eq!(svc.authenticate(&second.token).await.unwrap().name, "alice");
}

#[tokio::test]
async fn deleted_account_invalidates_token_lazily() {
    let accounts = setup().await;
    let svc = AuthService::new(
        accounts.clone(),
        MemorySessionStore::new(),
        AuthConfig::default(),
    );

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    accounts.delete("alice").await.unwrap();

    // Still stored until it is next used.
    assert_eq!(svc.sessions().len(), 1);
    assert!(matches!(
        svc.authenticate(&out.token).await.unwrap_err(),
        AuthError::InvalidToken
    ));
    assert!(svc.sessions().is_empty());

    // Re-registering the name does not resurrect the old session.
    register(&accounts, "alice", "secret1").await;
    assert!(svc.authenticate(&out.token).await.is_err());
}

#[tokio::test]
async fn token_does_not_carry_over_to_a_reregistered_name() {
    let accounts = setup().await;
    let svc = AuthService::new(
        accounts.clone(),
        MemorySessionStore::new(),
        AuthConfig::default(),
    );

    let old = svc.login(login("alice", "secret1")).await.unwrap();
    accounts.delete("alice").await.unwrap();
    accounts
        .create(CreateAccount {
            name: "alice".into(),
            email: "newcomer@example.com".into(),
            password_hash: password::hash_password("other-pass", None).unwrap(),
        })
        .await
        .unwrap();

    // The old token was never presented in between.
    assert!(matches!(
        svc.authenticate(&old.token).await.unwrap_err(),
        AuthError::InvalidToken
    ));
    assert!(svc.sessions().is_empty());

    let fresh = svc.login(login("alice", "other-pass")).await.unwrap();
    let principal = svc.authenticate(&fresh.token).await.unwrap();
    assert_eq!(principal.email, "newcomer@example.com");
}

#[tokio::test]
async fn authenticate_reflects_current_account_record() {
    let accounts = setup().await;
    let svc = AuthService::new(
        accounts.clone(),
        MemorySessionStore::new(),
        AuthConfig::default(),
    );

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    accounts
        .update(
            "alice",
            UpdateAccount {
                email: Some("alice@new.example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let principal = svc.authenticate(&out.token).await.unwrap();
    assert_eq!(principal.email, "alice@new.example.com");
}

#[tokio::test]
async fn pepper_must_match_between_hash_and_login() {
    let accounts = MemoryAccountRepository::new();
    accounts
        .create(CreateAccount {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: password::hash_password("secret1", Some("pepper!")).unwrap(),
        })
        .await
        .unwrap();

    let plain = AuthService::new(
        accounts.clone(),
        MemorySessionStore::new(),
        AuthConfig::default(),
    );
    assert!(matches!(
        plain.login(login("alice", "secret1")).await.unwrap_err(),
        AuthError::InvalidCredentials
    ));

    let peppered = AuthService::new(
        accounts,
        MemorySessionStore::new(),
        AuthConfig {
            pepper: Some("pepper!".into()),
            ..AuthConfig::default()
        },
    );
    assert!(peppered.login(login("alice", "secret1")).await.is_ok());
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let accounts = setup().await;
    let alice = accounts.find_by_name("alice").await.unwrap().unwrap();
    let sessions = MemorySessionStore::with_expiry();
    let svc = AuthService::new(accounts, sessions.clone(), AuthConfig::default());

    // A session whose TTL has already lapsed.
    let token = generate_session_token();
    sessions
        .create(
            Session::new(token.clone(), alice.principal(), alice.created_at),
            Duration::ZERO,
        )
        .await
        .unwrap();

    assert!(matches!(
        svc.authenticate(&token).await.unwrap_err(),
        AuthError::InvalidToken
    ));
}

#[tokio::test]
async fn authenticate_slides_expiry_forward() {
    let accounts = setup().await;
    let sessions = MemorySessionStore::with_expiry();
    let svc = AuthService::new(
        accounts,
        sessions.clone(),
        AuthConfig {
            session_ttl_secs: 60,
            ..AuthConfig::default()
        },
    );

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    let issued = sessions.get(&out.token).await.unwrap().unwrap();
    let first_expiry = issued.expires_at.unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    svc.authenticate(&out.token).await.unwrap();

    let refreshed = sessions.get(&out.token).await.unwrap().unwrap();
    assert!(refreshed.expires_at.unwrap() > first_expiry);
    assert_eq!(refreshed.issued_at, issued.issued_at);
}

#[tokio::test]
async fn fixed_expiry_when_sliding_disabled() {
    let accounts = setup().await;
    let sessions = MemorySessionStore::with_expiry();
    let svc = AuthService::new(
        accounts,
        sessions.clone(),
        AuthConfig {
            sliding_expiry: false,
            ..AuthConfig::default()
        },
    );

    let out = svc.login(login("alice", "secret1")).await.unwrap();
    let before = sessions.get(&out.token).await.unwrap().unwrap().expires_at;
    tokio::time::sleep(Duration::from_millis(20)).await;
    svc.authenticate(&out.token).await.unwrap();
    let after = sessions.get(&out.token).await.unwrap().unwrap().expires_at;
    assert_eq!(before, after);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn logout_racing_authenticate_settles_cleanly() {
    let accounts = setup().await;
    let svc = std::sync::Arc::new(AuthService::new(
        accounts,
        MemorySessionStore::new(),
        AuthConfig::default(),
    ));
    let out = svc.login(login("alice", "secret1")).await.unwrap();

    let auth = {
        let svc = svc.clone();
        let token = out.token.clone();
        tokio::spawn(async move { svc.authenticate(&token).await })
    };
    let logout = {
        let svc = svc.clone();
        let token = out.token.clone();
        tokio::spawn(async move { svc.logout(&token).await })
    };

    logout.await.unwrap().unwrap();
    match auth.await.unwrap() {
        Ok(principal) => assert_eq!(principal.name, "alice"),
        Err(err) => assert!(matches!(err, AuthError::InvalidToken)),
    }
    assert!(svc.authenticate(&out.token).await.is_err());
}

/// Session store whose backend is down.
struct FailingStore {
    timeout: bool,
}

impl FailingStore {
    fn error(&self) -> StoreError {
        if self.timeout {
            StoreError::Timeout
        } else {
            StoreError::Backend("connection refused".into())
        }
    }
}

impl SessionStore for FailingStore {
    async fn create(&self, _session: Session, _ttl: Duration) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn get(&self, _token: &str) -> Result<Option<Session>, StoreError> {
        Err(self.error())
    }

    async fn refresh_ttl(&self, _token: &str, _ttl: Duration) -> Result<bool, StoreError> {
        Err(self.error())
    }

    async fn delete(&self, _token: &str) -> Result<(), StoreError> {
        Err(self.error())
    }
}

#[tokio::test]
async fn store_outage_surfaces_from_every_operation() {
    for timeout in [true, false] {
        let accounts = setup().await;
        let svc = AuthService::new(accounts, FailingStore { timeout }, AuthConfig::default());

        let errors = [
            svc.login(login("alice", "secret1")).await.unwrap_err(),
            svc.authenticate(&generate_session_token())
                .await
                .unwrap_err(),
            svc.logout(&generate_session_token()).await.unwrap_err(),
        ];

        for err in errors {
            match &err {
                AuthError::StoreUnavailable(StoreError::Timeout) => assert!(timeout),
                AuthError::StoreUnavailable(StoreError::Backend(_)) => assert!(!timeout),
                other => panic!("expected StoreUnavailable, got {other:?}"),
            }
            let err: ScribeError = err.into();
            assert_eq!(err.status_code(), 503);
            assert_eq!(err.is_retryable(), timeout);
        }
    }
}

#[tokio::test]
async fn store_outage_does_not_look_like_bad_credentials() {
    let accounts = setup().await;
    let svc = AuthService::new(
        accounts,
        FailingStore { timeout: true },
        AuthConfig::default(),
    );

    // Wrong password fails before the store is touched.
    assert!(matches!(
        svc.login(login("alice", "wrongpass")).await.unwrap_err(),
        AuthError::InvalidCredentials
    ));
    // A malformed token is rejected without a store lookup.
    assert!(matches!(
        svc.authenticate("short").await.unwrap_err(),
        AuthError::InvalidToken
    ));
}
