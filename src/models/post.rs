use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a post, embedded in the post itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub read_time: u32,
    pub views: i64,
    pub likes: i64,
}

impl Default for PostMetadata {
    fn default() -> Self {
        Self {
            read_time: 1,
            views: 0,
            likes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: PostMetadata,
}

impl Post {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            metadata: self.metadata,
        }
    }

    /// Case-insensitive containment over title, excerpt and content.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }

    /// Whether the post was edited after it went out.
    pub fn edited_after_publish(&self) -> bool {
        match self.published_at {
            Some(published_at) => self.updated_at > published_at,
            None => false,
        }
    }
}

/// List and search projection of a post: everything but the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: PostMetadata,
}

/// Draft data submitted when creating a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub author: Option<Author>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub author: Option<Author>,
}
