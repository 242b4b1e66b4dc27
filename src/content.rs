//! Post body helpers: HTML rendering, plain-text extraction, excerpts and
//! reading time.
//!
//! Post content is Markdown, which also lets authors paste raw HTML. Rendered
//! output always goes through ammonia before it reaches a page.

use std::collections::HashSet;

use pulldown_cmark::{html, Options, Parser};

/// Characters of plain text taken from the content for a derived excerpt.
pub const EXCERPT_SOURCE_CHARS: usize = 150;

const WORDS_PER_MINUTE: usize = 200;

fn markdown_to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(content, options);
    let mut out = String::with_capacity(content.len() + content.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Renders content to sanitized HTML, safe to embed unescaped.
pub fn render_html(content: &str) -> String {
    ammonia::clean(&markdown_to_html(content))
}

/// Strips all markup and collapses whitespace.
///
/// Raw HTML inside the content is stripped as a whole document, so script and
/// style bodies never leak into the text.
pub fn plain_text(content: &str) -> String {
    let stripped = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(&markdown_to_html(content))
        .to_string();
    let text = html_escape::decode_html_entities(&stripped);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Excerpt used when the author leaves it blank.
pub fn derive_excerpt(content: &str) -> String {
    let text = plain_text(content);
    if text.chars().count() <= EXCERPT_SOURCE_CHARS {
        return text;
    }
    let head: String = text.chars().take(EXCERPT_SOURCE_CHARS).collect();
    format!("{}...", head.trim_end())
}

/// Whole minutes at 200 words per minute, never less than one.
pub fn read_time(content: &str) -> u32 {
    let words = plain_text(content).split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
