//! Integration tests for the in-process repositories.

use scribe_core::error::ScribeError;
use scribe_core::models::account::{CreateAccount, UpdateAccount};
use scribe_core::models::comment::{CommentFilter, CreateComment, UpdateComment};
use scribe_core::models::post::{CreatePost, PostFilter, UpdatePost};
use scribe_core::repository::{
    AccountRepository, CommentRepository, Pagination, PostRepository,
};
use scribe_db::memory::{
    MemoryAccountRepository, MemoryCommentRepository, MemoryPostRepository,
};
use uuid::Uuid;

fn new_account(name: &str) -> CreateAccount {
    CreateAccount {
        name: name.into(),
        email: format!("{name}@example.com"),
        password_hash: "$argon2id$placeholder".into(),
    }
}

// -----------------------------------------------------------------------
// Accounts
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_find_account() {
    let repo = MemoryAccountRepository::new();
    let account = repo.create(new_account("alice")).await.unwrap();
    assert_eq!(account.name, "alice");

    let found = repo.find_by_name("alice").await.unwrap().unwrap();
    assert_eq!(found.email, "alice@example.com");
    assert!(repo.find_by_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_name_or_email_is_rejected() {
    let repo = MemoryAccountRepository::new();
    repo.create(new_account("alice")).await.unwrap();

    let err = repo.create(new_account("alice")).await.unwrap_err();
    assert!(matches!(err, ScribeError::AlreadyExists { .. }));

    let err = repo
        .create(CreateAccount {
            email: "alice@example.com".into(),
            ..new_account("alicia")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_account_fields() {
    let repo = MemoryAccountRepository::new();
    repo.create(new_account("alice")).await.unwrap();
    repo.create(new_account("bob")).await.unwrap();

    let updated = repo
        .update(
            "alice",
            UpdateAccount {
                email: Some("alice@new.example.com".into()),
                password_hash: Some("$argon2id$other".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@new.example.com");
    assert_eq!(updated.password_hash, "$argon2id$other");

    // Taking someone else's email fails, keeping your own is fine.
    let err = repo
        .update(
            "alice",
            UpdateAccount {
                email: Some("bob@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::AlreadyExists { .. }));
    repo.update(
        "bob",
        UpdateAccount {
            email: Some("bob@example.com".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = repo
        .update("nobody", UpdateAccount::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::NotFound { .. }));
}

#[tokio::test]
async fn delete_and_list_accounts() {
    let repo = MemoryAccountRepository::new();
    for name in ["alice", "bob", "carol"] {
        repo.create(new_account(name)).await.unwrap();
    }

    repo.delete("bob").await.unwrap();
    assert!(repo.find_by_name("bob").await.unwrap().is_none());
    assert!(matches!(
        repo.delete("bob").await.unwrap_err(),
        ScribeError::NotFound { .. }
    ));

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 1,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
}

// -----------------------------------------------------------------------
// Posts
// -----------------------------------------------------------------------

#[tokio::test]
async fn post_lifecycle() {
    let repo = MemoryPostRepository::new();
    let post = repo
        .create(CreatePost {
            author_name: "alice".into(),
            title: "Hello".into(),
            content: "First post".into(),
        })
        .await
        .unwrap();

    let fetched = repo.get_by_id(post.id).await.unwrap();
    assert_eq!(fetched.title, "Hello");

    let updated = repo
        .update(
            post.id,
            UpdatePost {
                title: "Hello again".into(),
                content: "Edited".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Hello again");
    assert!(updated.modified_at >= updated.created_at);
    assert_eq!(updated.author_name, "alice");

    repo.delete(post.id).await.unwrap();
    assert!(matches!(
        repo.get_by_id(post.id).await.unwrap_err(),
        ScribeError::NotFound { .. }
    ));
}

#[tokio::test]
async fn list_posts_by_author() {
    let repo = MemoryPostRepository::new();
    for (author, title) in [("alice", "one"), ("bob", "two"), ("alice", "three")] {
        repo.create(CreatePost {
            author_name: author.into(),
            title: title.into(),
            content: "body".into(),
        })
        .await
        .unwrap();
    }

    let all = repo
        .list(PostFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let alice = repo
        .list(
            PostFilter {
                author_name: Some("alice".into()),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(alice.total, 2);
    assert!(alice.items.iter().all(|p| p.author_name == "alice"));
}

// -----------------------------------------------------------------------
// Comments
// -----------------------------------------------------------------------

#[tokio::test]
async fn comment_lifecycle_and_filters() {
    let repo = MemoryCommentRepository::new();
    let post_a = Uuid::new_v4();
    let post_b = Uuid::new_v4();

    let first = repo
        .create(CreateComment {
            author_name: "alice".into(),
            post_id: post_a,
            content: "great".into(),
        })
        .await
        .unwrap();
    repo.create(CreateComment {
        author_name: "bob".into(),
        post_id: post_b,
        content: "meh".into(),
    })
    .await
    .unwrap();
    repo.create(CreateComment {
        author_name: "carol".into(),
        post_id: post_a,
        content: "agreed".into(),
    })
    .await
    .unwrap();

    let on_a = repo
        .list(
            CommentFilter {
                post_id: Some(post_a),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(on_a.total, 2);

    let bob_or_a = repo
        .list(
            CommentFilter {
                author_name: Some("bob".into()),
                post_id: Some(post_a),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(bob_or_a.total, 3);

    let updated = repo
        .update(
            first.id,
            UpdateComment {
                content: "really great".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "really great");

    repo.delete(first.id).await.unwrap();
    assert!(matches!(
        repo.delete(first.id).await.unwrap_err(),
        ScribeError::NotFound { .. }
    ));
}
