//! Post access used by every view: lookups, listing, search and writes.
//!
//! Validation and derived fields (excerpt, reading time, publication
//! timestamps) live here so every backing store sees the same data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::content::{derive_excerpt, read_time};
use crate::models::{
    validate_author, validate_content, validate_excerpt, validate_tags, validate_title, Author,
    ListQuery, NewPost, Page, Post, PostMetadata, PostPatch, PostSummary,
};
use crate::store::{PostFilter, PostStore};
use crate::{Error, Result};

#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn PostStore>,
    default_author: String,
}

impl PostRepository {
    pub fn new(store: Arc<dyn PostStore>, default_author: impl Into<String>) -> Self {
        Self {
            store,
            default_author: default_author.into(),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Post> {
        tracing::debug!(post_id = %id, "Fetching post");
        self.store.fetch(id).await?.ok_or(Error::NotFound)
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<PostSummary>> {
        tracing::debug!(
            page = query.pagination.page,
            per_page = query.pagination.per_page,
            include_drafts = query.include_drafts,
            "Listing posts"
        );
        let filter = PostFilter {
            search: None,
            include_drafts: query.include_drafts,
        };
        self.store.list(&filter, query.pagination).await
    }

    /// A blank query behaves exactly like [`PostRepository::list`].
    pub async fn search(&self, query: &str, list: ListQuery) -> Result<Page<PostSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list(list).await;
        }

        tracing::debug!(query, page = list.pagination.page, "Searching posts");
        let filter = PostFilter {
            search: Some(query.to_string()),
            include_drafts: list.include_drafts,
        };
        self.store.list(&filter, list.pagination).await
    }

    pub async fn create(&self, draft: NewPost) -> Result<Post> {
        let post = build_post(draft, &self.default_author, Utc::now())?;
        self.store.insert(&post).await?;

        tracing::info!(post_id = %post.id, published = post.published, "Created post");
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post> {
        let current = self.get_by_id(id).await?;
        let updated = apply_patch(current, patch, Utc::now())?;

        // The post can disappear between the read and the write.
        if !self.store.replace(&updated).await? {
            return Err(Error::NotFound);
        }

        tracing::info!(post_id = %id, published = updated.published, "Updated post");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.remove(id).await? {
            return Err(Error::NotFound);
        }
        tracing::info!(post_id = %id, "Deleted post");
        Ok(())
    }

    pub async fn record_view(&self, id: Uuid) -> Result<()> {
        if !self.store.increment_views(id).await? {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    /// Returns the new like count.
    pub async fn like(&self, id: Uuid) -> Result<i64> {
        self.store.increment_likes(id).await?.ok_or(Error::NotFound)
    }
}

fn build_post(draft: NewPost, default_author: &str, now: DateTime<Utc>) -> Result<Post> {
    let title = validate_title(&draft.title)?;
    let content = validate_content(draft.content)?;
    let excerpt = validate_excerpt(draft.excerpt.as_deref())?
        .unwrap_or_else(|| derive_excerpt(&content));
    let tags = validate_tags(draft.tags)?;
    let author = match draft.author {
        Some(author) => validate_author(author)?,
        None => Author::named(default_author),
    };

    Ok(Post {
        id: Uuid::new_v4(),
        metadata: PostMetadata {
            read_time: read_time(&content),
            ..PostMetadata::default()
        },
        title,
        content,
        excerpt,
        author,
        tags,
        published: draft.published,
        created_at: now,
        updated_at: now,
        published_at: draft.published.then_some(now),
    })
}

fn apply_patch(mut post: Post, patch: PostPatch, now: DateTime<Utc>) -> Result<Post> {
    let excerpt_was_derived = post.excerpt == derive_excerpt(&post.content);

    if let Some(title) = patch.title {
        post.title = validate_title(&title)?;
    }

    let mut content_changed = false;
    if let Some(content) = patch.content {
        let content = validate_content(content)?;
        content_changed = content != post.content;
        post.content = content;
    }

    match patch.excerpt {
        Some(excerpt) => {
            post.excerpt = validate_excerpt(Some(&excerpt))?
                .unwrap_or_else(|| derive_excerpt(&post.content));
        }
        None if content_changed && excerpt_was_derived => {
            post.excerpt = derive_excerpt(&post.content);
        }
        None => {}
    }

    if let Some(tags) = patch.tags {
        post.tags = validate_tags(tags)?;
    }

    if let Some(author) = patch.author {
        post.author = validate_author(author)?;
    }

    if let Some(published) = patch.published {
        match (post.published, published) {
            (false, true) => post.published_at = Some(now),
            (true, false) => post.published_at = None,
            _ => {}
        }
        post.published = published;
    }

    post.metadata.read_time = read_time(&post.content);
    post.updated_at = now;

    Ok(post)
}
