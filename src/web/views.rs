use askama::Template;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::content::{derive_excerpt, render_html};
use crate::models::{normalize_tags, NewPost, Page, Post, PostPatch, PostSummary};

use super::handlers::ListParams;

const CARD_TAGS: usize = 3;

pub const LIST_FAILED: &str = "Unable to load posts. Please try again later.";
pub const DETAIL_FAILED: &str = "Failed to load post. Please try again later.";
pub const NOT_FOUND: &str = "Post not found";

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Link to another page of the current listing, keeping its filters.
fn posts_href(params: &ListParams, page: u32) -> String {
    let mut pairs = url::form_urlencoded::Serializer::new(String::new());
    pairs.append_pair("page", &page.to_string());
    if let Some(query) = params.q.as_deref().filter(|q| !q.is_empty()) {
        pairs.append_pair("q", query);
    }
    if let Some(per_page) = params.per_page {
        pairs.append_pair("per_page", &per_page.to_string());
    }
    if params.drafts == Some(true) {
        pairs.append_pair("drafts", "true");
    }
    format!("/posts?{}", pairs.finish())
}

pub struct PostCard {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub date: String,
    pub date_iso: String,
    pub read_time: u32,
    pub tags: Vec<String>,
    pub more_tags: usize,
    pub draft: bool,
}

impl From<PostSummary> for PostCard {
    fn from(post: PostSummary) -> Self {
        let shown = post.published_at.unwrap_or(post.created_at);
        let more_tags = post.tags.len().saturating_sub(CARD_TAGS);
        Self {
            id: post.id,
            title: post.title,
            excerpt: post.excerpt,
            author_name: post.author.name,
            author_avatar: post.author.avatar,
            date: format_date(shown),
            date_iso: shown.to_rfc3339(),
            read_time: post.metadata.read_time,
            tags: post.tags.into_iter().take(CARD_TAGS).collect(),
            more_tags,
            draft: !post.published,
        }
    }
}

#[derive(Template)]
#[template(path = "posts.html")]
pub struct PostListTemplate {
    pub query: String,
    pub cards: Vec<PostCard>,
    pub error: Option<&'static str>,
    pub empty_message: &'static str,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PostListTemplate {
    pub fn new(params: &ListParams, page: Page<PostSummary>) -> Self {
        let query = params.q.clone().unwrap_or_default();
        let prev_href = page
            .has_prev()
            .then(|| posts_href(params, page.page - 1));
        let next_href = page
            .has_next()
            .then(|| posts_href(params, page.page + 1));
        let empty_message = if query.trim().is_empty() {
            "No posts available yet."
        } else {
            "No posts found matching your search."
        };

        Self {
            cards: page.items.into_iter().map(PostCard::from).collect(),
            query,
            error: None,
            empty_message,
            prev_href,
            next_href,
        }
    }

    pub fn failed(query: String) -> Self {
        Self {
            query,
            cards: Vec::new(),
            error: Some(LIST_FAILED),
            empty_message: "",
            prev_href: None,
            next_href: None,
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostDetailTemplate {
    pub post: Post,
    pub content_html: String,
    pub date: String,
    pub date_iso: String,
    pub updated: Option<String>,
}

impl PostDetailTemplate {
    pub fn new(post: Post) -> Self {
        let shown = post.published_at.unwrap_or(post.created_at);
        let updated = post
            .edited_after_publish()
            .then(|| format_date(post.updated_at));
        Self {
            content_html: render_html(&post.content),
            date: format_date(shown),
            date_iso: shown.to_rfc3339(),
            updated,
            post,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

impl ErrorTemplate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fields of the create/edit form. Tags arrive comma-separated; an
/// unchecked checkbox is simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub published: Option<String>,
}

impl PostForm {
    /// A derived excerpt is left blank so it is derived again from the
    /// edited content.
    pub fn from_post(post: &Post) -> Self {
        let excerpt = if post.excerpt == derive_excerpt(&post.content) {
            String::new()
        } else {
            post.excerpt.clone()
        };
        Self {
            title: post.title.clone(),
            excerpt,
            content: post.content.clone(),
            tags: post.tags.join(", "),
            published: post.published.then(|| "on".to_string()),
        }
    }

    pub fn is_published(&self) -> bool {
        self.published.is_some()
    }

    pub fn tag_list(&self) -> Vec<String> {
        normalize_tags(self.tags.split(','))
    }

    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            excerpt: Some(self.excerpt.clone()),
            tags: self.tag_list(),
            published: self.is_published(),
            author: None,
        }
    }

    pub fn to_patch(&self) -> PostPatch {
        PostPatch {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            excerpt: Some(self.excerpt.clone()),
            tags: Some(self.tag_list()),
            published: Some(self.is_published()),
            author: None,
        }
    }
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub form: PostForm,
    pub error: Option<String>,
}

impl PostFormTemplate {
    pub fn create(form: PostForm, error: Option<String>) -> Self {
        Self {
            heading: "New Post",
            action: "/posts".to_string(),
            submit_label: "Create Post",
            form,
            error,
        }
    }

    pub fn edit(id: Uuid, form: PostForm, error: Option<String>) -> Self {
        Self {
            heading: "Edit Post",
            action: format!("/posts/{}", id),
            submit_label: "Update Post",
            form,
            error,
        }
    }
}
