//! SurrealDB implementation of [`PostRepository`].

use chrono::{DateTime, Utc};
use scribe_core::error::ScribeResult;
use scribe_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use scribe_core::repository::{PaginatedResult, Pagination, PostRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct PostRow {
    author_name: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct PostRowWithId {
    record_id: String,
    author_name: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, id: Uuid) -> Post {
        Post {
            id,
            author_name: self.author_name,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

impl PostRowWithId {
    fn try_into_post(self) -> Result<Post, DbError> {
        Ok(Post {
            id: parse_uuid(&self.record_id, "post")?,
            author_name: self.author_name,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Post repository.
#[derive(Clone)]
pub struct SurrealPostRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPostRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        entity: "post".into(),
        id: id.to_string(),
    }
}

impl<C: Connection> PostRepository for SurrealPostRepository<C> {
    async fn create(&self, input: CreatePost) -> ScribeResult<Post> {
        let id = Uuid::new_v4();

        let result = self
            .db
            .query(
                "CREATE type::record('post', $id) SET \
                 author_name = $author_name, \
                 title = $title, content = $content",
            )
            .bind(("id", id.to_string()))
            .bind(("author_name", input.author_name))
            .bind(("title", input.title))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("post", e.to_string()))?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_post(id))
    }

    async fn get_by_id(&self, id: Uuid) -> ScribeResult<Post> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('post', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_post(id))
    }

    async fn update(&self, id: Uuid, input: UpdatePost) -> ScribeResult<Post> {
        let result = self
            .db
            .query(
                "UPDATE type::record('post', $id) SET \
                 title = $title, content = $content, \
                 modified_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .bind(("title", input.title))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("post", e.to_string()))?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_post(id))
    }

    async fn delete(&self, id: Uuid) -> ScribeResult<()> {
        let mut result = self
            .db
            .query("DELETE type::record('post', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(not_found(id).into());
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Post>> {
        let where_clause = if filter.author_name.is_some() {
            "WHERE author_name = $author_name"
        } else {
            ""
        };

        let count_query = format!("SELECT count() AS total FROM post {where_clause} GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let Some(author) = filter.author_name.clone() {
            count_builder = count_builder.bind(("author_name", author));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM post {where_clause} \
             ORDER BY created_at ASC \
             LIMIT $limit START $offset"
        );
        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let Some(author) = filter.author_name {
            builder = builder.bind(("author_name", author));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<PostRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_post())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
