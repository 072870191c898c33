//! Post domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Owned;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Owned for Post {
    fn owner(&self) -> Option<&str> {
        Some(self.author_name.as_str()).filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub author_name: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
}

/// List filter; `None` lists every post.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author_name: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.author_name
            .as_deref()
            .is_none_or(|author| post.author_name == author)
    }
}
