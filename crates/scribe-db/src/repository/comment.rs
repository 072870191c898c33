//! SurrealDB implementation of [`CommentRepository`].

use chrono::{DateTime, Utc};
use scribe_core::error::ScribeResult;
use scribe_core::models::comment::{Comment, CommentFilter, CreateComment, UpdateComment};
use scribe_core::repository::{CommentRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CommentRow {
    author_name: String,
    post_id: String,
    content: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CommentRowWithId {
    record_id: String,
    author_name: String,
    post_id: String,
    content: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self, id: Uuid) -> Result<Comment, DbError> {
        Ok(Comment {
            id,
            author_name: self.author_name,
            post_id: parse_uuid(&self.post_id, "post")?,
            content: self.content,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}

impl CommentRowWithId {
    fn try_into_comment(self) -> Result<Comment, DbError> {
        let id = parse_uuid(&self.record_id, "comment")?;
        CommentRow {
            author_name: self.author_name,
            post_id: self.post_id,
            content: self.content,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
        .into_comment(id)
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Comment repository.
#[derive(Clone)]
pub struct SurrealCommentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCommentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        entity: "comment".into(),
        id: id.to_string(),
    }
}

/// `WHERE` clause for a comment filter; either condition matches.
fn where_clause(filter: &CommentFilter) -> String {
    let mut conditions = Vec::new();
    if filter.author_name.is_some() {
        conditions.push("author_name = $author_name");
    }
    if filter.post_id.is_some() {
        conditions.push("post_id = $post_id");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" OR "))
    }
}

impl<C: Connection> CommentRepository for SurrealCommentRepository<C> {
    async fn create(&self, input: CreateComment) -> ScribeResult<Comment> {
        let id = Uuid::new_v4();

        let result = self
            .db
            .query(
                "CREATE type::record('comment', $id) SET \
                 author_name = $author_name, \
                 post_id = $post_id, content = $content",
            )
            .bind(("id", id.to_string()))
            .bind(("author_name", input.author_name))
            .bind(("post_id", input.post_id.to_string()))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("comment", e.to_string()))?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_comment(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ScribeResult<Comment> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('comment', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_comment(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateComment) -> ScribeResult<Comment> {
        let result = self
            .db
            .query(
                "UPDATE type::record('comment', $id) SET \
                 content = $content, modified_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("comment", e.to_string()))?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id))?;

        Ok(row.into_comment(id)?)
    }

    async fn delete(&self, id: Uuid) -> ScribeResult<()> {
        let mut result = self
            .db
            .query("DELETE type::record('comment', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(not_found(id).into());
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: CommentFilter,
        pagination: Pagination,
    ) -> ScribeResult<PaginatedResult<Comment>> {
        let where_clause = where_clause(&filter);

        let count_query = format!("SELECT count() AS total FROM comment {where_clause} GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let Some(author) = filter.author_name.clone() {
            count_builder = count_builder.bind(("author_name", author));
        }
        if let Some(post_id) = filter.post_id {
            count_builder = count_builder.bind(("post_id", post_id.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM comment {where_clause} \
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
        if let Some(post_id) = filter.post_id {
            builder = builder.bind(("post_id", post_id.to_string()));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<CommentRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_comment())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
