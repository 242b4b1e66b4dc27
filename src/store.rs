//! Backing store port. The platform treats persistence as an external
//! service; everything above this trait is storage-agnostic.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Page, Pagination, Post, PostSummary};

pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive containment over title, excerpt and content.
    pub search: Option<String>,
    pub include_drafts: bool,
}

/// Listing order for every store: publication date descending, drafts last
/// by creation date descending, id as the final tie-break.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn fetch(&self, id: Uuid) -> crate::Result<Option<Post>>;

    async fn list(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> crate::Result<Page<PostSummary>>;

    async fn insert(&self, post: &Post) -> crate::Result<()>;

    /// Overwrites the editable fields of an existing post. View and like
    /// counters are left to the store. Returns `false` when `post.id` is absent.
    async fn replace(&self, post: &Post) -> crate::Result<bool>;

    async fn remove(&self, id: Uuid) -> crate::Result<bool>;

    async fn increment_views(&self, id: Uuid) -> crate::Result<bool>;

    /// Returns the new like count, or `None` when the post is absent.
    async fn increment_likes(&self, id: Uuid) -> crate::Result<Option<i64>>;
}
