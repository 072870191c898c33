//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in
//! `scribe-db`; the auth and blog layers depend only on these traits.

use uuid::Uuid;

use crate::error::ScribeResult;
use crate::models::{
    account::{Account, CreateAccount, UpdateAccount},
    comment::{Comment, CommentFilter, CreateComment, UpdateComment},
    post::{CreatePost, Post, PostFilter, UpdatePost},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    /// Slice an already ordered, fully materialized list.
    pub fn from_ordered(all: Vec<T>, pagination: &Pagination) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();
        Self {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub trait AccountRepository: Send + Sync {
    /// Fails with `AlreadyExists` if the name or email is taken.
    fn create(&self, input: CreateAccount) -> impl Future<Output = ScribeResult<Account>> + Send;
    /// Resource lookup used by login and lazy session invalidation.
    /// An absent account is `Ok(None)`, not an error.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = ScribeResult<Option<Account>>> + Send;
    fn update(
        &self,
        name: &str,
        input: UpdateAccount,
    ) -> impl Future<Output = ScribeResult<Account>> + Send;
    /// Hard delete. Sessions referencing the account become invalid on
    /// their next use.
    fn delete(&self, name: &str) -> impl Future<Output = ScribeResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = ScribeResult<PaginatedResult<Account>>> + Send;
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

pub trait PostRepository: Send + Sync {
    fn create(&self, input: CreatePost) -> impl Future<Output = ScribeResult<Post>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ScribeResult<Post>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdatePost,
    ) -> impl Future<Output = ScribeResult<Post>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = ScribeResult<()>> + Send;
    fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> impl Future<Output = ScribeResult<PaginatedResult<Post>>> + Send;
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub trait CommentRepository: Send + Sync {
    fn create(&self, input: CreateComment) -> impl Future<Output = ScribeResult<Comment>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ScribeResult<Comment>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateComment,
    ) -> impl Future<Output = ScribeResult<Comment>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = ScribeResult<()>> + Send;
    fn list(
        &self,
        filter: CommentFilter,
        pagination: Pagination,
    ) -> impl Future<Output = ScribeResult<PaginatedResult<Comment>>> + Send;
}
