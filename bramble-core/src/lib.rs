//! # bramble-core
//!
//! Core library for the bramble static site generator.
//!
//! This crate provides configuration loading, markdown rendering, excerpt
//! extraction, and the build pipeline that turns a posts directory into a
//! site index ready for templating.

pub mod builder;
pub mod config;
pub mod excerpt;
pub mod feed;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod seo;
pub mod slug;

pub use builder::SiteBuilder;
pub use config::{Config, HighlightOptions, PassthroughRule, PluginEntry, RssOptions, SeoOptions};
pub use excerpt::{extract_excerpt, EXCERPT_SEPARATOR};
pub use models::{Frontmatter, Post, SiteIndex};
pub use slug::slugify;
