use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PostFilter, PostStore};
use crate::models::{Page, Pagination, Post, PostSummary};

/// In-process store backed by a `HashMap`. Contents are lost on restart.
pub struct MemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

fn listing_order(a: &PostSummary, b: &PostSummary) -> Ordering {
    let by_published = match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_published
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn fetch(&self, id: Uuid) -> crate::Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> crate::Result<Page<PostSummary>> {
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<PostSummary> = {
            let posts = self.posts.read().await;
            posts
                .values()
                .filter(|p| filter.include_drafts || p.published)
                .filter(|p| needle.as_deref().map_or(true, |n| p.matches(n)))
                .map(Post::summary)
                .collect()
        };
        matched.sort_by(listing_order);

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok(Page::new(items, pagination, total))
    }

    async fn insert(&self, post: &Post) -> crate::Result<()> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(crate::Error::Internal(format!(
                "post {} already exists",
                post.id
            )));
        }
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn replace(&self, post: &Post) -> crate::Result<bool> {
        let mut posts = self.posts.write().await;
        let Some(existing) = posts.get_mut(&post.id) else {
            return Ok(false);
        };

        let views = existing.metadata.views;
        let likes = existing.metadata.likes;
        *existing = post.clone();
        existing.metadata.views = views;
        existing.metadata.likes = likes;

        Ok(true)
    }

    async fn remove(&self, id: Uuid) -> crate::Result<bool> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn increment_views(&self, id: Uuid) -> crate::Result<bool> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&id) {
            Some(post) => {
                post.metadata.views += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_likes(&self, id: Uuid) -> crate::Result<Option<i64>> {
        let mut posts = self.posts.write().await;
        Ok(posts.get_mut(&id).map(|post| {
            post.metadata.likes += 1;
            post.metadata.likes
        }))
    }
}
