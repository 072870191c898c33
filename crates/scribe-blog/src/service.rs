//! Blog service: account, post and comment operations with
//! ownership-gated mutation.

use scribe_auth::config::AuthConfig;
use scribe_auth::{password, policy};
use scribe_core::error::{ScribeError, ScribeResult};
use scribe_core::models::account::{Account, CreateAccount, Principal, UpdateAccount};
use scribe_core::models::comment::{Comment, CommentFilter, CreateComment, UpdateComment};
use scribe_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use scribe_core::repository::{
    AccountRepository, CommentRepository, PaginatedResult, Pagination, PostRepository,
};
use tracing::info;
use uuid::Uuid;

use crate::input::{
    NewAccountInput, NewCommentInput, PostInput, UpdateAccountInput, UpdateCommentInput,
};
use crate::validate;

/// Blog operations over pluggable record stores.
///
/// Reads are open to everyone. Updates and deletes load the target
/// first (missing → `NotFound`), then require the caller to own it
/// (otherwise `AuthorizationDenied`), then validate the payload.
pub struct BlogService<A, P, C>
where
    A: AccountRepository,
    P: PostRepository,
    C: CommentRepository,
{
    accounts: A,
    posts: P,
    comments: C,
    config: AuthConfig,
}

impl<A, P, C> BlogService<A, P, C>
where
    A: AccountRepository,
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(accounts: A, posts: P, comments: C, config: AuthConfig) -> Self {
        Self {
            accounts,
            posts,
            comments,
            config,
        }
    }

    fn hash(&self, password: &str) -> ScribeResult<String> {
        Ok(password::hash_password(
            password,
            self.config.pepper.as_deref(),
        )?)
    }

    // -------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------

    pub async fn register_account(&self, input: NewAccountInput) -> ScribeResult<Account> {
        validate::new_account(&input, self.config.min_password_length)?;

        if self.accounts.find_by_name(&input.name).await?.is_some() {
            return Err(ScribeError::AlreadyExists {
                entity: "account".into(),
            });
        }

        let account = self
            .accounts
            .create(CreateAccount {
                password_hash: self.hash(&input.password)?,
                name: input.name,
                email: input.email,
            })
            .await?;

        info!(name = %account.name, "Account registered");
        Ok(account)
    }

    pub async fn get_account(&self, name: &str) -> ScribeResult<Account> {
        self.accounts
            .find_by_name(name)
            .await?
            .ok_or_else(|| ScribeError::not_found("account", name))
    }

    pub async fn list_accounts(
        &self,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Account>> {
        self.accounts.list(pagination).await
    }

    /// Replace the caller's password and email.
    pub async fn update_account(
        &self,
        principal: &Principal,
        name: &str,
        input: UpdateAccountInput,
    ) -> ScribeResult<Account> {
        let account = self.get_account(name).await?;
        policy::authorize_mutation(principal, &account)?;
        validate::update_account(&input, self.config.min_password_length)?;

        self.accounts
            .update(
                &account.name,
                UpdateAccount {
                    email: Some(input.email),
                    password_hash: Some(self.hash(&input.password)?),
                },
            )
            .await
    }

    /// Delete the caller's account. Open sessions for it are rejected
    /// the next time they are presented.
    pub async fn delete_account(&self, principal: &Principal, name: &str) -> ScribeResult<()> {
        let account = self.get_account(name).await?;
        policy::authorize_mutation(principal, &account)?;

        self.accounts.delete(&account.name).await?;
        info!(name = %account.name, "Account deleted");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------

    pub async fn create_post(&self, principal: &Principal, input: PostInput) -> ScribeResult<Post> {
        validate::post(&input)?;
        self.posts
            .create(CreatePost {
                author_name: principal.name.clone(),
                title: input.title,
                content: input.content,
            })
            .await
    }

    pub async fn get_post(&self, id: Uuid) -> ScribeResult<Post> {
        self.posts.get_by_id(id).await
    }

    pub async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Post>> {
        self.posts.list(filter, pagination).await
    }

    pub async fn update_post(
        &self,
        principal: &Principal,
        id: Uuid,
        input: PostInput,
    ) -> ScribeResult<Post> {
        let post = self.posts.get_by_id(id).await?;
        policy::authorize_mutation(principal, &post)?;
        validate::post(&input)?;

        self.posts
            .update(
                id,
                UpdatePost {
                    title: input.title,
                    content: input.content,
                },
            )
            .await
    }

    pub async fn delete_post(&self, principal: &Principal, id: Uuid) -> ScribeResult<()> {
        let post = self.posts.get_by_id(id).await?;
        policy::authorize_mutation(principal, &post)?;
        self.posts.delete(id).await
    }

    // -------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------

    /// Comment on an existing post.
    pub async fn create_comment(
        &self,
        principal: &Principal,
        input: NewCommentInput,
    ) -> ScribeResult<Comment> {
        validate::new_comment(&input)?;
        let post = self.posts.get_by_id(input.post_id).await?;

        self.comments
            .create(CreateComment {
                author_name: principal.name.clone(),
                post_id: post.id,
                content: input.content,
            })
            .await
    }

    pub async fn get_comment(&self, id: Uuid) -> ScribeResult<Comment> {
        self.comments.get_by_id(id).await
    }

    pub async fn list_comments(
        &self,
        filter: CommentFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Comment>> {
        self.comments.list(filter, pagination).await
    }

    pub async fn update_comment(
        &self,
        principal: &Principal,
        id: Uuid,
        input: UpdateCommentInput,
    ) -> ScribeResult<Comment> {
        let comment = self.comments.get_by_id(id).await?;
        policy::authorize_mutation(principal, &comment)?;
        validate::update_comment(&input)?;

        self.comments
            .update(
                id,
                UpdateComment {
                    content: input.content,
                },
            )
            .await
    }

    pub async fn delete_comment(&self, principal: &Principal, id: Uuid) -> ScribeResult<()> {
        let comment = self.comments.get_by_id(id).await?;
        policy::authorize_mutation(principal, &comment)?;
        self.comments.delete(id).await
    }
}
