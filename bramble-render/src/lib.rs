//! Askama template definitions.

use askama::Template;

/// A post entry for display in the index listing
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub url: String,
    pub title: String,
    pub date: Option<String>,
    /// Excerpt HTML, substituted inline; absent when no preview exists
    pub excerpt: Option<String>,
}

/// Post page template
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    // Page metadata
    pub title: String,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub tags: Vec<String>,

    // Content
    pub content: String,

    // Head tags contributed by the seo plugin (empty when disabled)
    pub seo_head: String,

    // Site metadata
    pub site_title: String,
    pub site_author: String,
    pub year: i32,

    // Asset prefix for nested base URLs
    pub css_path: String,
    pub base_url: String,
}

/// Index page template
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub site_description: String,
    pub site_author: String,
    pub year: i32,

    pub seo_head: String,

    pub items: Vec<PostEntry>,

    pub css_path: String,
    pub base_url: String,
}

/// 404 error page template
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub site_title: String,
    pub site_author: String,
    pub year: i32,

    pub seo_head: String,

    pub css_path: String,
    pub base_url: String,
}
