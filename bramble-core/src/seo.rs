//! SEO head tag generation for the `seo` plugin.

use crate::config::{Config, SeoOptions};
use crate::feed::{absolute_url, escape_xml};

/// Page-level inputs for head tag generation
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Output-relative path of the page ("" for the index)
    pub rel_path: &'a str,
}

/// Render the `<meta>`/OpenGraph block for a page head.
///
/// Returned HTML is inserted verbatim into templates; all values are
/// escaped here.
pub fn head_tags(config: &Config, opts: &SeoOptions, page: &PageMeta<'_>) -> String {
    let base_url = config.normalized_base_url();
    let canonical = absolute_url(&config.site.url, &base_url, page.rel_path);
    let title = escape_xml(page.title);
    let description = escape_xml(page.description);

    let mut tags = String::new();
    tags.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        description
    ));
    tags.push_str(&format!("<link rel=\"canonical\" href=\"{}\">\n", canonical));
    tags.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        title
    ));
    tags.push_str(&format!(
        "<meta property=\"og:description\" content=\"{}\">\n",
        description
    ));
    tags.push_str(&format!(
        "<meta property=\"og:url\" content=\"{}\">\n",
        canonical
    ));
    tags.push_str("<meta property=\"og:type\" content=\"article\">\n");

    if let Some(image) = &opts.default_image {
        let image_url = absolute_url(&config.site.url, &base_url, image);
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            escape_xml(&image_url)
        ));
    }

    if let Some(handle) = &opts.twitter_handle {
        tags.push_str("<meta name=\"twitter:card\" content=\"summary\">\n");
        tags.push_str(&format!(
            "<meta name=\"twitter:site\" content=\"{}\">\n",
            escape_xml(handle)
        ));
    }

    tags
}
