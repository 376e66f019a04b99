//! Excerpt extraction from rendered post HTML.
//!
//! An excerpt is the preview text shown in listings and feeds. Authors can
//! end it explicitly with a `<!--more-->` comment in their content; without
//! one the first paragraph is used, and failing that the whole content.

use crate::models::Post;

/// Marker authors embed to end the excerpt explicitly.
pub const EXCERPT_SEPARATOR: &str = "<!--more-->";

const PARAGRAPH_CLOSE: &str = "</p>";

/// Derive preview text from a post's rendered HTML.
///
/// Rules, in priority order:
/// 1. Content before the first `<!--more-->` marker, trimmed.
/// 2. Prefix up to and including the first `</p>`.
/// 3. The full content unchanged.
///
/// A post that has not been rendered yet produces a single warning and no
/// excerpt; callers proceed without a preview. The input is never mutated.
pub fn extract_excerpt(post: &Post) -> Option<String> {
    let Some(content) = post.rendered_html.as_deref() else {
        tracing::warn!(
            slug = %post.slug,
            "Failed to extract excerpt: post has no rendered content"
        );
        return None;
    };

    Some(excerpt_from_html(content))
}

/// Excerpt rules over already-rendered HTML. Total: always returns a string.
pub fn excerpt_from_html(content: &str) -> String {
    if let Some(idx) = content.find(EXCERPT_SEPARATOR) {
        return content[..idx].trim().to_string();
    }

    if let Some(idx) = content.find(PARAGRAPH_CLOSE) {
        return content[..idx + PARAGRAPH_CLOSE.len()].to_string();
    }

    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frontmatter, Post};
    use std::io;
    use std::sync::{Arc, Mutex};

    fn post_with(rendered_html: Option<&str>) -> Post {
        Post {
            slug: "test-post".to_string(),
            title: "Test Post".to_string(),
            rendered_html: rendered_html.map(|s| s.to_string()),
            frontmatter: Frontmatter::default(),
            tags: vec![],
            date: None,
            updated: None,
            excerpt: None,
            source_path: None,
        }
    }

    #[test]
    fn test_first_paragraph_excerpt() {
        let post = post_with(Some("<p>Hello world</p><p>More</p>"));
        assert_eq!(
            extract_excerpt(&post),
            Some("<p>Hello world</p>".to_string())
        );
    }

    #[test]
    fn test_separator_marker_takes_precedence() {
        let post = post_with(Some("Intro text<!--more-->Rest of post"));
        assert_eq!(extract_excerpt(&post), Some("Intro text".to_string()));
    }

    #[test]
    fn test_marker_wins_over_paragraph_tag() {
        let post = post_with(Some("<p>First</p><!--more--><p>Second</p>"));
        assert_eq!(extract_excerpt(&post), Some("<p>First</p>".to_string()));
    }

    #[test]
    fn test_plain_text_returned_verbatim() {
        let post = post_with(Some("Just plain text, no markers"));
        assert_eq!(
            extract_excerpt(&post),
            Some("Just plain text, no markers".to_string())
        );
    }

    #[test]
    fn test_empty_content() {
        let post = post_with(Some(""));
        assert_eq!(extract_excerpt(&post), Some(String::new()));
    }

    #[test]
    fn test_marker_with_nothing_before_it() {
        let post = post_with(Some("  <!--more-->Everything after"));
        assert_eq!(extract_excerpt(&post), Some(String::new()));
    }

    #[test]
    fn test_marker_prefix_is_trimmed() {
        let post = post_with(Some("  Intro text \n<!--more-->Rest"));
        assert_eq!(extract_excerpt(&post), Some("Intro text".to_string()));
    }

    #[test]
    fn test_inline_markup_without_paragraphs() {
        let post = post_with(Some("<em>short</em> note"));
        assert_eq!(
            extract_excerpt(&post),
            Some("<em>short</em> note".to_string())
        );
    }

    #[test]
    fn test_idempotent() {
        let post = post_with(Some("<p>One</p><p>Two</p>"));
        let first = extract_excerpt(&post);
        let second = extract_excerpt(&post);
        assert_eq!(first, second);
    }

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_unrendered_post_warns_once_and_yields_none() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let result =
            tracing::subscriber::with_default(subscriber, || extract_excerpt(&post_with(None)));

        assert_eq!(result, None);

        let output = writer.contents();
        assert_eq!(output.matches("WARN").count(), 1);
        assert!(output.contains("no rendered content"));
    }
}
