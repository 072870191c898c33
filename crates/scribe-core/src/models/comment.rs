//! Comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Owned;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_name: String,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner(&self) -> Option<&str> {
        Some(self.author_name.as_str()).filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub author_name: String,
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct UpdateComment {
    pub content: String,
}

/// List filter. When both fields are set a comment matching *either*
/// one is returned; with neither set every comment is returned.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub author_name: Option<String>,
    pub post_id: Option<Uuid>,
}

impl CommentFilter {
    pub fn is_empty(&self) -> bool {
        self.author_name.is_none() && self.post_id.is_none()
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        if self.is_empty() {
            return true;
        }
        self.author_name.as_deref() == Some(comment.author_name.as_str())
            || self.post_id == Some(comment.post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: &str, post_id: Uuid) -> Comment {
        let now = Utc::now();
        Comment {
            id: Uuid::new_v4(),
            author_name: author.into(),
            post_id,
            content: "nice post".into(),
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = CommentFilter::default();
        assert!(filter.matches(&comment("alice", Uuid::new_v4())));
    }

    #[test]
    fn either_field_is_enough_to_match() {
        let post_id = Uuid::new_v4();
        let filter = CommentFilter {
            author_name: Some("alice".into()),
            post_id: Some(post_id),
        };
        assert!(filter.matches(&comment("alice", Uuid::new_v4())));
        assert!(filter.matches(&comment("bob", post_id)));
        assert!(!filter.matches(&comment("bob", Uuid::new_v4())));
    }

    #[test]
    fn ownerless_comment_has_no_owner() {
        assert_eq!(comment("", Uuid::new_v4()).owner(), None);
    }
}
