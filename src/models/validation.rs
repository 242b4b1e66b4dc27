//! Per-field validation for post input.
//!
//! Each validator returns the normalized value it accepted. Lengths are
//! counted in characters, not bytes.

use super::Author;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_EXCERPT_CHARS: usize = 500;
pub const MAX_TAG_CHARS: usize = 50;
pub const MAX_TAGS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be less than {} characters", MAX_TITLE_CHARS)]
    TitleTooLong,

    #[error("Content is required")]
    ContentRequired,

    #[error("Excerpt must be less than {} characters", MAX_EXCERPT_CHARS)]
    ExcerptTooLong,

    #[error("Tag `{0}` must be less than {max} characters", max = MAX_TAG_CHARS)]
    TagTooLong(String),

    #[error("A post can have at most {} tags", MAX_TAGS)]
    TooManyTags,

    #[error("Author name is required")]
    AuthorNameRequired,

    /// The request body could not be read as post input at all.
    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    InvalidQuery(String),
}

pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title.to_string())
}

/// Content keeps its original whitespace; only emptiness is checked.
pub fn validate_content(content: String) -> Result<String, ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    Ok(content)
}

/// `None` means the excerpt should be derived from the content.
pub fn validate_excerpt(excerpt: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(excerpt) = excerpt.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    if excerpt.chars().count() > MAX_EXCERPT_CHARS {
        return Err(ValidationError::ExcerptTooLong);
    }
    Ok(Some(excerpt.to_string()))
}

/// Trims, drops blanks and removes duplicates while keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

pub fn validate_tags(tags: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let tags = normalize_tags(tags);
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags);
    }
    if let Some(tag) = tags.iter().find(|t| t.chars().count() > MAX_TAG_CHARS) {
        return Err(ValidationError::TagTooLong(tag.clone()));
    }
    Ok(tags)
}

pub fn validate_author(author: Author) -> Result<Author, ValidationError> {
    let name = author.name.trim();
    if name.is_empty() {
        return Err(ValidationError::AuthorNameRequired);
    }
    Ok(Author {
        name: name.to_string(),
        avatar: author
            .avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert_eq!(validate_title(&"a".repeat(200)).unwrap().len(), 200);
        assert_eq!(
            validate_title(&"a".repeat(201)),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(validate_title("   "), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_title_counts_chars_not_bytes() {
        let title = "é".repeat(200);
        assert!(title.len() > 200);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_title("  Hello  ").unwrap(), "Hello");
    }

    #[test]
    fn test_content_required() {
        assert_eq!(
            validate_content(" \n ".to_string()),
            Err(ValidationError::ContentRequired)
        );
        assert_eq!(validate_content(" body ".to_string()).unwrap(), " body ");
    }

    #[test]
    fn test_length_messages() {
        assert_eq!(
            ValidationError::TitleTooLong.to_string(),
            "Title must be less than 200 characters"
        );
        assert_eq!(
            ValidationError::ExcerptTooLong.to_string(),
            "Excerpt must be less than 500 characters"
        );
    }

    #[test]
    fn test_excerpt_bounds() {
        assert_eq!(validate_excerpt(None).unwrap(), None);
        assert_eq!(validate_excerpt(Some("  ")).unwrap(), None);
        assert!(validate_excerpt(Some(&"x".repeat(500))).unwrap().is_some());
        assert_eq!(
            validate_excerpt(Some(&"x".repeat(501))),
            Err(ValidationError::ExcerptTooLong)
        );
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags([" rust ", "", "web", "rust", "Rust"]);
        assert_eq!(tags, vec!["rust", "web", "Rust"]);
    }

    #[test]
    fn test_tag_limits() {
        let many: Vec<String> = (0..21).map(|i| format!("tag{i}")).collect();
        assert_eq!(validate_tags(many), Err(ValidationError::TooManyTags));

        let long = "t".repeat(51);
        let err = validate_tags(vec![long.clone()]).unwrap_err();
        assert_eq!(err, ValidationError::TagTooLong(long.clone()));
        assert_eq!(
            err.to_string(),
            format!("Tag `{}` must be less than 50 characters", long)
        );
    }

    #[test]
    fn test_author() {
        assert_eq!(
            validate_author(Author::named(" ")),
            Err(ValidationError::AuthorNameRequired)
        );

        let author = validate_author(Author {
            name: " Ada ".to_string(),
            avatar: Some(" ".to_string()),
        })
        .unwrap();
        assert_eq!(author.name, "Ada");
        assert_eq!(author.avatar, None);
    }
}
