//! SurrealDB repository implementations.

mod account;
mod comment;
mod post;

pub use account::SurrealAccountRepository;
pub use comment::SurrealCommentRepository;
pub use post::SurrealPostRepository;

use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Corrupt(format!("invalid {what} UUID: {e}")))
}
