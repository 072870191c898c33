//! In-process implementation of [`PostRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use scribe_core::error::ScribeResult;
use scribe_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use scribe_core::repository::{PaginatedResult, Pagination, PostRepository};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Clone, Default)]
pub struct MemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        entity: "post".into(),
        id: id.to_string(),
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, input: CreatePost) -> ScribeResult<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_name: input.author_name,
            title: input.title,
            content: input.content,
            created_at: now,
            modified_at: now,
        };
        self.posts.write().insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_by_id(&self, id: Uuid) -> ScribeResult<Post> {
        Ok(self
            .posts
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))?)
    }

    async fn update(&self, id: Uuid, input: UpdatePost) -> ScribeResult<Post> {
        let mut posts = self.posts.write();
        let post = posts.get_mut(&id).ok_or_else(|| not_found(id))?;
        post.title = input.title;
        post.content = input.content;
        post.modified_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> ScribeResult<()> {
        self.posts
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id).into())
    }

    async fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Post>> {
        let mut all: Vec<Post> = self
            .posts
            .read()
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();
        all.sort_by_key(|post| post.created_at);
        Ok(PaginatedResult::from_ordered(all, &pagination))
    }
}
