//! Request payloads accepted by [`BlogService`](crate::BlogService).

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct NewAccountInput {
    pub name: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountInput {
    pub password: String,
    pub email: String,
}

/// Body of both post creation and post update.
#[derive(Debug, Clone, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCommentInput {
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommentInput {
    pub content: String,
}
