mod page;
mod post;
mod validation;

pub use page::{ListQuery, Page, Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use post::{Author, NewPost, Post, PostMetadata, PostPatch, PostSummary};
pub use validation::{
    normalize_tags, validate_author, validate_content, validate_excerpt, validate_tags,
    validate_title, ValidationError, MAX_EXCERPT_CHARS, MAX_TAGS, MAX_TAG_CHARS, MAX_TITLE_CHARS,
};
