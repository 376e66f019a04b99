//! RSS 2.0 feed generation for the `rss` plugin.

use crate::config::{Config, RssOptions};
use crate::models::SiteIndex;
use chrono::NaiveDate;

/// Render the RSS channel for the site's published posts, newest first.
///
/// Item descriptions use the post excerpt, falling back to the frontmatter
/// description and then the title.
pub fn render_feed(config: &Config, index: &SiteIndex, opts: &RssOptions) -> String {
    let base_url = config.normalized_base_url();
    let mut items = String::new();

    let posts = index.published();
    let posts: Vec<_> = match opts.limit {
        Some(limit) => posts.take(limit).collect(),
        None => posts.collect(),
    };

    for post in posts {
        let link = absolute_url(&config.site.url, &base_url, &post.output_rel_path());
        let title = escape_xml(&post.title);
        let description = escape_xml(
            post.excerpt
                .as_ref()
                .or(post.frontmatter.description.as_ref())
                .unwrap_or(&post.title),
        );

        let pub_date = post
            .updated
            .or(post.date)
            .and_then(|d| naive_to_rfc2822(&d));

        items.push_str(&format!(
            "<item><title>{}</title><link>{}</link><guid>{}</guid><description>{}</description>",
            title, link, link, description
        ));
        if let Some(pd) = pub_date {
            items.push_str(&format!("<pubDate>{}</pubDate>", pd));
        }
        items.push_str("</item>");
    }

    let channel_link = absolute_url(&config.site.url, &base_url, "");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
    {}
  </channel>
</rss>
"#,
        escape_xml(&config.site.title),
        channel_link,
        escape_xml(&config.site.description),
        items
    )
}

/// Join a site URL, base path, and relative path into an absolute URL
pub fn absolute_url(site_url: &str, base_url: &str, rel: &str) -> String {
    let root = site_url.trim_end_matches('/').to_string();
    let mut base = base_url.trim_matches('/').to_string();
    if !base.is_empty() {
        base = format!("/{}", base);
    }
    let rel_clean = rel.trim_start_matches('/');
    let joined = if rel_clean.is_empty() {
        format!("{}{}", root, base)
    } else {
        format!("{}{}/{}", root, base, rel_clean)
    };
    joined.replace("//", "/").replace(":/", "://")
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn naive_to_rfc2822(date: &NaiveDate) -> Option<String> {
    let datetime = date.and_hms_opt(0, 0, 0)?;
    Some(datetime.and_utc().to_rfc2822())
}
