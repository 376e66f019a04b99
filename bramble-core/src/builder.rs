//! Site building logic - orchestrates parsing, rendering, and excerpts.

use crate::{
    config::Config,
    excerpt::extract_excerpt,
    frontmatter::parse_frontmatter,
    markdown::MarkdownProcessor,
    models::{Post, SiteIndex},
    slug::slugify,
};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] crate::frontmatter::FrontmatterError),

    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    /// Assemble the pipeline from the configured plugin list. The plugin
    /// entries are consumed here, once, in list order.
    pub fn new(config: Config) -> Self {
        let theme = config.highlight_options().map(|opts| opts.theme.clone());
        Self {
            processor: MarkdownProcessor::new(theme.as_deref()),
            config,
        }
    }

    /// Build the in-memory site index: parse, render, and compute excerpts
    pub fn build(&self) -> Result<SiteIndex, BuildError> {
        fs::create_dir_all(self.config.output_dir())?;

        let markdown_files = self.discover_markdown_files()?;

        tracing::info!("Found {} markdown files", markdown_files.len());

        let mut posts = Vec::new();
        let mut sources = Vec::new();
        let mut slug_map: HashMap<String, PathBuf> = HashMap::new();

        for file_path in &markdown_files {
            match self.parse_post(file_path) {
                Ok(post) => {
                    if let Some(existing) = slug_map.get(&post.slug) {
                        tracing::warn!(
                            "Duplicate slug '{}' from {:?} and {:?}",
                            post.slug,
                            existing,
                            file_path
                        );
                        return Err(BuildError::DuplicateSlug(post.slug.clone()));
                    }
                    slug_map.insert(post.slug.clone(), file_path.clone());
                    posts.push(post);
                    sources.push(file_path.clone());
                }
                Err(e) => {
                    // A malformed post never aborts the build
                    tracing::error!("Failed to parse {:?}: {}", file_path, e);
                }
            }
        }

        // Render pass: markdown to HTML, then derive each post's excerpt
        for (post, source) in posts.iter_mut().zip(&sources) {
            let markdown = fs::read_to_string(source)?;
            let (_, body) = parse_frontmatter(&markdown)?;

            post.rendered_html = Some(self.processor.convert(&body));
            post.excerpt = extract_excerpt(post);
        }

        // Newest first for listings and feeds
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        tracing::info!("Built site index with {} posts", posts.len());

        Ok(SiteIndex { posts })
    }

    /// Copy passthrough sources verbatim into the output, each under its
    /// own directory name
    pub fn copy_passthrough(&self) -> Result<(), BuildError> {
        let output_dir = self.config.output_dir();

        for (source, name) in self.config.passthrough_targets() {
            if !source.exists() {
                tracing::warn!("Passthrough source {:?} does not exist, skipping", source);
                continue;
            }
            copy_dir(&source, &output_dir.join(name))?;
            tracing::info!("Copied passthrough {:?}", source);
        }

        Ok(())
    }

    /// Discover all markdown files in the posts directory
    fn discover_markdown_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let posts_dir = self.config.posts_dir();
        let mut files = Vec::new();
        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);

        for entry in WalkDir::new(&posts_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Some(ext) = entry.path().extension() {
                if ext == "md" {
                    let rel = entry
                        .path()
                        .strip_prefix(&posts_dir)
                        .unwrap_or(entry.path())
                        .to_string_lossy()
                        .to_string();
                    if should_ignore(&rel, &ignore_patterns) {
                        tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                        continue;
                    }

                    files.push(entry.path().to_path_buf());
                }
            }
        }

        Ok(files)
    }

    /// Parse a single markdown file into a Post (without rendering yet)
    fn parse_post(&self, path: &Path) -> Result<Post, BuildError> {
        let content = fs::read_to_string(path)?;
        let (frontmatter, _body) = parse_frontmatter(&content)?;

        // Fall back to filename when the title is missing (pure markdown)
        let mut title = frontmatter.title.clone();
        if title.trim().is_empty() {
            title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string();
        }

        let slug = frontmatter.slug.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(slugify)
                .unwrap_or_else(|| slugify(&title))
        });

        let date = frontmatter
            .date
            .as_ref()
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let updated = frontmatter
            .updated
            .as_ref()
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let posts_dir = self.config.posts_dir();
        let source_path = path
            .strip_prefix(&posts_dir)
            .ok()
            .and_then(|p| p.to_str())
            .map(|s| s.to_string());

        Ok(Post {
            slug,
            title,
            rendered_html: None, // Filled in the render pass
            tags: frontmatter.tags.clone(),
            date,
            updated,
            excerpt: None, // Derived after rendering
            source_path,
            frontmatter,
        })
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

/// Recursively copy all files under `src` into `dest`, preserving layout
pub fn copy_dir(src: &Path, dest: &Path) -> Result<(), BuildError> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
    }
    Ok(())
}
