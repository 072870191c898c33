//! In-process implementation of [`CommentRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use scribe_core::error::ScribeResult;
use scribe_core::models::comment::{Comment, CommentFilter, CreateComment, UpdateComment};
use scribe_core::repository::{CommentRepository, PaginatedResult, Pagination};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Clone, Default)]
pub struct MemoryCommentRepository {
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        entity: "comment".into(),
        id: id.to_string(),
    }
}

impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, input: CreateComment) -> ScribeResult<Comment> {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            author_name: input.author_name,
            post_id: input.post_id,
            content: input.content,
            created_at: now,
            modified_at: now,
        };
        self.comments.write().insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn get_by_id(&self, id: Uuid) -> ScribeResult<Comment> {
        Ok(self
            .comments
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))?)
    }

    async fn update(&self, id: Uuid, input: UpdateComment) -> ScribeResult<Comment> {
        let mut comments = self.comments.write();
        let comment = comments.get_mut(&id).ok_or_else(|| not_found(id))?;
        comment.content = input.content;
        comment.modified_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete(&self, id: Uuid) -> ScribeResult<()> {
        self.comments
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id).into())
    }

    async fn list(
        &self,
        filter: CommentFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Comment>> {
        let mut all: Vec<Comment> = self
            .comments
            .read()
            .values()
            .filter(|comment| filter.matches(comment))
            .cloned()
            .collect();
        all.sort_by_key(|comment| comment.created_at);
        Ok(PaginatedResult::from_ordered(all, &pagination))
    }
}
