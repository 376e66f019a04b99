//! Markdown processing pipeline.

pub mod highlight;

pub use highlight::HighlightTransformer;

use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown processor. Syntax highlighting is attached when the
/// `syntax_highlight` plugin is configured.
pub struct MarkdownProcessor {
    options: Options,
    highlighter: Option<HighlightTransformer>,
}

impl MarkdownProcessor {
    pub fn new(highlight_theme: Option<&str>) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self {
            options,
            highlighter: highlight_theme.map(HighlightTransformer::new),
        }
    }

    /// Convert markdown to HTML
    pub fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let events: Vec<Event> = parser.collect();

        let events = match &self.highlighter {
            Some(highlighter) => highlighter.transform(events),
            None => events,
        };

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_render_to_p_tags() {
        let processor = MarkdownProcessor::new(None);
        let html = processor.convert("Hello world\n\nSecond paragraph");
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("<p>Second paragraph</p>"));
    }

    #[test]
    fn test_tables_enabled() {
        let processor = MarkdownProcessor::new(None);
        let html = processor.convert("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_fenced_code_highlighted_when_configured() {
        let processor = MarkdownProcessor::new(Some("InspiredGitHub"));
        let html = processor.convert("```rust\nfn main() {}\n```");
        // syntect emits inline-styled spans instead of a bare code block
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_fenced_code_plain_without_highlighter() {
        let processor = MarkdownProcessor::new(None);
        let html = processor.convert("```rust\nfn main() {}\n```");
        assert!(html.contains("<code"));
        assert!(!html.contains("<span style"));
    }
}
