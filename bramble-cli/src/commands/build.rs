//! Build command implementation.

use anyhow::{Context, Result};
use askama::Template;
use bramble_core::{feed, seo, Config, PluginEntry, Post, SeoOptions, SiteBuilder, SiteIndex};
use bramble_render::{IndexTemplate, NotFoundTemplate, PostEntry, PostTemplate};
use chrono::Datelike;
use std::fs;
use std::path::Path;

/// Build the static site (writes output) and discard the in-memory index
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config).map(|_| ())
}

/// Build the site from an already loaded config, writing output and
/// returning the index.
pub fn build_site_with_config(config: Config) -> Result<SiteIndex> {
    let base_url = config.normalized_base_url();

    tracing::info!("Building site: {}", config.site.title);

    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build().context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let seo_opts = config.seo_options().cloned();

    // Render individual post pages
    for post in &site_index.posts {
        if post.is_draft() {
            tracing::debug!("Skipping draft: {}", post.title);
            continue;
        }

        render_post_page(&config, post, seo_opts.as_ref(), &base_url)?;
    }

    render_index_page(&config, &site_index, seo_opts.as_ref(), &base_url)?;
    render_404_page(&config, seo_opts.as_ref(), &base_url)?;

    // Remaining plugins emit in configured order
    for plugin in &config.plugins {
        match plugin {
            // Consumed when the markdown pipeline was assembled
            PluginEntry::SyntaxHighlight(_) => {}
            // Applied per page during rendering
            PluginEntry::Seo(_) => {}
            PluginEntry::Rss(opts) => {
                let rss = feed::render_feed(&config, &site_index, opts);
                fs::write(output_dir.join(&opts.filename), rss)
                    .with_context(|| format!("Failed to write {}", opts.filename))?;
                tracing::info!("Generated {}", opts.filename);
            }
        }
    }

    builder
        .copy_passthrough()
        .context("Failed to copy passthrough assets")?;

    let published = site_index.published().count();
    tracing::info!("✓ Built {} pages", published);
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(site_index)
}

/// Render a single post page
fn render_post_page(
    config: &Config,
    post: &Post,
    seo_opts: Option<&SeoOptions>,
    base_url: &str,
) -> Result<()> {
    let rel_path = post.output_rel_path();
    let seo_head = seo_head_for(config, seo_opts, &post.title, post_description(post), &rel_path);

    let date = post.date.as_ref().map(|d| d.format("%Y-%m-%d").to_string());
    let updated = post
        .updated
        .as_ref()
        .map(|d| d.format("%Y-%m-%d").to_string());

    let template = PostTemplate {
        title: post.title.clone(),
        date,
        updated,
        tags: post.tags.clone(),
        content: post.rendered_html.clone().unwrap_or_default(),
        seo_head,
        site_title: config.site.title.clone(),
        site_author: config.site.author.clone(),
        year: chrono::Utc::now().year(),
        css_path: base_url.to_string(),
        base_url: base_url.to_string(),
    };

    let html = template.render().context("Failed to render post template")?;

    let output_path = config.output_dir().join(&rel_path);
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))?;

    tracing::debug!("Rendered: {}", post.slug);

    Ok(())
}

/// Render the index page listing published posts with their excerpts
fn render_index_page(
    config: &Config,
    site_index: &SiteIndex,
    seo_opts: Option<&SeoOptions>,
    base_url: &str,
) -> Result<()> {
    let items: Vec<PostEntry> = site_index
        .published()
        .map(|post| PostEntry {
            url: post.url_with_base(base_url),
            title: post.title.clone(),
            date: post.date.as_ref().map(|d| d.format("%Y-%m-%d").to_string()),
            excerpt: post.excerpt.clone(),
        })
        .collect();

    let seo_head = seo_head_for(
        config,
        seo_opts,
        &config.site.title,
        &config.site.description,
        "index.html",
    );

    let template = IndexTemplate {
        site_title: config.site.title.clone(),
        site_description: config.site.description.clone(),
        site_author: config.site.author.clone(),
        year: chrono::Utc::now().year(),
        seo_head,
        items,
        css_path: base_url.to_string(),
        base_url: base_url.to_string(),
    };

    let html = template
        .render()
        .context("Failed to render index template")?;

    let output_path = config.output_dir().join("index.html");
    fs::write(&output_path, html).context("Failed to write index.html")?;

    tracing::info!("Rendered index page");

    Ok(())
}

/// Render the 404 error page
fn render_404_page(config: &Config, seo_opts: Option<&SeoOptions>, base_url: &str) -> Result<()> {
    let seo_head = seo_head_for(
        config,
        seo_opts,
        "Page not found",
        &config.site.description,
        "404.html",
    );

    let template = NotFoundTemplate {
        site_title: config.site.title.clone(),
        site_author: config.site.author.clone(),
        year: chrono::Utc::now().year(),
        seo_head,
        css_path: base_url.to_string(),
        base_url: base_url.to_string(),
    };

    let html = template.render().context("Failed to render 404 template")?;

    let output_path = config.output_dir().join("404.html");
    fs::write(&output_path, html).context("Failed to write 404.html")?;

    tracing::info!("Rendered 404 page");

    Ok(())
}

fn post_description(post: &Post) -> &str {
    post.frontmatter
        .description
        .as_deref()
        .unwrap_or(&post.title)
}

fn seo_head_for(
    config: &Config,
    seo_opts: Option<&SeoOptions>,
    title: &str,
    description: &str,
    rel_path: &str,
) -> String {
    match seo_opts {
        Some(opts) => seo::head_tags(
            config,
            opts,
            &seo::PageMeta {
                title,
                description,
                rel_path,
            },
        ),
        None => String::new(),
    }
}
