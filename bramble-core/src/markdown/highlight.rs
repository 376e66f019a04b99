//! Code syntax highlighting using syntect.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn load_theme(name: &str) -> Theme {
    let theme_set = ThemeSet::load_defaults();
    theme_set
        .themes
        .get(name)
        .or_else(|| {
            tracing::warn!("Unknown highlight theme '{}', using InspiredGitHub", name);
            theme_set.themes.get("InspiredGitHub")
        })
        .expect("syntect default themes include InspiredGitHub")
        .clone()
}

/// Transformer for syntax highlighting fenced code blocks
pub struct HighlightTransformer {
    theme: Theme,
}

impl HighlightTransformer {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: load_theme(theme_name),
        }
    }

    /// Transform events, replacing fenced code blocks with highlighted HTML
    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut result = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    in_code_block = true;
                    code_lang = Some(lang.to_string());
                    code_content.clear();
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(text.as_ref());
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    in_code_block = false;

                    let lang = code_lang.take().unwrap_or_default();
                    if lang.is_empty() {
                        // No language specified, output as plain pre/code
                        result.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)));
                        result.push(Event::Text(CowStr::Boxed(
                            code_content.clone().into_boxed_str(),
                        )));
                        result.push(Event::End(TagEnd::CodeBlock));
                    } else {
                        let highlighted = self.highlight_code(&code_content, &lang);
                        result.push(Event::Html(CowStr::Boxed(highlighted.into_boxed_str())));
                    }
                }
                other => result.push(other),
            }
        }

        result
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let ss = syntax_set();
        let syntax = ss
            .find_syntax_by_token(lang)
            .or_else(|| ss.find_syntax_by_extension(lang))
            .unwrap_or_else(|| ss.find_syntax_plain_text());

        match highlighted_html_for_string(code, ss, syntax, &self.theme) {
            Ok(html) => html,
            Err(_) => {
                // Fallback to plain code block
                format!("<pre><code>{}</code></pre>", html_escape(code))
            }
        }
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::Parser;

    fn render(markdown: &str, transformer: &HighlightTransformer) -> String {
        let events: Vec<Event> = Parser::new(markdown).collect();
        let events = transformer.transform(events);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        html
    }

    #[test]
    fn test_highlights_known_language() {
        let transformer = HighlightTransformer::new("InspiredGitHub");
        let html = render("```rust\nlet x = 1;\n```", &transformer);
        assert!(html.contains("<pre"));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let transformer = HighlightTransformer::new("InspiredGitHub");
        let html = render("```nosuchlang\nplain stuff\n```", &transformer);
        assert!(html.contains("plain stuff"));
    }

    #[test]
    fn test_unfenced_block_left_alone() {
        let transformer = HighlightTransformer::new("InspiredGitHub");
        let html = render("    indented code", &transformer);
        assert!(html.contains("<code>"));
    }

    #[test]
    fn test_unknown_theme_does_not_panic() {
        let transformer = HighlightTransformer::new("no-such-theme");
        let html = render("```rust\nlet x = 1;\n```", &transformer);
        assert!(html.contains("<pre"));
    }
}
