//! Content model structs for posts and the site index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    /// Required for authored posts. Defaults to empty so parsing can
    /// report the absence as a field error instead of a YAML error.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub updated: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub slug: Option<String>,
}

/// A single post in the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (e.g., "rust-safety")
    pub slug: String,

    /// Display title
    pub title: String,

    /// Rendered HTML content. Absent until the render pass has run.
    pub rendered_html: Option<String>,

    /// Original frontmatter
    pub frontmatter: Frontmatter,

    /// Tags for categorization
    pub tags: Vec<String>,

    /// Publication date
    pub date: Option<NaiveDate>,

    /// Last updated date
    pub updated: Option<NaiveDate>,

    /// Preview text derived from the rendered HTML
    pub excerpt: Option<String>,

    /// Source path relative to the posts directory
    pub source_path: Option<String>,
}

impl Post {
    /// Get the URL path for this post
    pub fn url(&self) -> String {
        format!("/{}", self.output_rel_path())
    }

    /// Get the URL for this post including a base path
    pub fn url_with_base(&self, base_url: &str) -> String {
        format!(
            "{}{}",
            crate::config::normalize_base_url(base_url),
            self.output_rel_path()
        )
    }

    /// Check if this post is a draft
    pub fn is_draft(&self) -> bool {
        self.frontmatter.draft
    }

    /// Relative output path for this post (no leading slash)
    pub fn output_rel_path(&self) -> String {
        format!("{}.html", self.slug)
    }
}

/// Complete built site: all posts, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteIndex {
    pub posts: Vec<Post>,
}

impl SiteIndex {
    /// Find a post by its slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Posts that should appear in listings and feeds
    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.is_draft())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: "Sample".to_string(),
            rendered_html: None,
            frontmatter: Frontmatter::default(),
            tags: vec![],
            date: None,
            updated: None,
            excerpt: None,
            source_path: None,
        }
    }

    #[test]
    fn test_output_rel_path() {
        let post = sample_post("hello-world");
        assert_eq!(post.output_rel_path(), "hello-world.html");
        assert_eq!(post.url(), "/hello-world.html");
    }

    #[test]
    fn test_url_with_base() {
        let post = sample_post("hello");
        assert_eq!(post.url_with_base("/blog"), "/blog/hello.html");
        assert_eq!(post.url_with_base("/"), "/hello.html");
    }

    #[test]
    fn test_published_excludes_drafts() {
        let mut draft = sample_post("draft");
        draft.frontmatter.draft = true;
        let index = SiteIndex {
            posts: vec![sample_post("a"), draft, sample_post("b")],
        };
        let slugs: Vec<_> = index.published().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }
}
