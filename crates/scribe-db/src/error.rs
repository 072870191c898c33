//! Database-specific error types and conversions.

use scribe_core::error::ScribeError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl DbError {
    /// Classify a failed statement, recognising unique-index violations.
    pub(crate) fn from_statement(entity: &str, message: String) -> Self {
        if message.contains("already contains") || message.contains("already exists") {
            DbError::AlreadyExists {
                entity: entity.into(),
            }
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for ScribeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ScribeError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => ScribeError::AlreadyExists { entity },
            other => ScribeError::Database(other.to_string()),
        }
    }
}
