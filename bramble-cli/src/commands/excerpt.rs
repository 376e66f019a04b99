//! Excerpt command implementation.

use anyhow::{Context, Result};
use bramble_core::{
    extract_excerpt, frontmatter::parse_frontmatter, markdown::MarkdownProcessor, Config, Post,
};
use std::fs;
use std::path::Path;

/// Render a single markdown file and print its excerpt.
///
/// Uses the configured markdown pipeline when a config file is present,
/// so the output matches what listings would show.
pub fn print_excerpt(config_path: &Path, file: &Path) -> Result<()> {
    let highlight_theme = Config::from_file(config_path)
        .ok()
        .and_then(|c| c.highlight_options().map(|opts| opts.theme.clone()));
    let processor = MarkdownProcessor::new(highlight_theme.as_deref());

    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let (frontmatter, body) = parse_frontmatter(&content).context("Failed to parse frontmatter")?;

    let slug = file
        .file_stem()
        .and_then(|s| s.to_str())
        .map(bramble_core::slugify)
        .unwrap_or_default();

    let post = Post {
        slug,
        title: frontmatter.title.clone(),
        rendered_html: Some(processor.convert(&body)),
        tags: frontmatter.tags.clone(),
        date: None,
        updated: None,
        excerpt: None,
        source_path: None,
        frontmatter,
    };

    match extract_excerpt(&post) {
        Some(excerpt) => println!("{}", excerpt),
        None => anyhow::bail!("No excerpt available for {:?}", file),
    }

    Ok(())
}
