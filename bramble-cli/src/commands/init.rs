//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../bramble.yml.example");

const DEFAULT_STYLE: &str = "\
body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 1rem;
  font-family: system-ui, sans-serif;
  line-height: 1.6;
}

.post-meta, .site-footer {
  color: #666;
  font-size: 0.9rem;
}
";

/// Initialize a new bramble site
pub fn init_site(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_site(root)?;

    println!("✓ bramble site initialized in {:?}", root);
    println!("  - Edit bramble.yml to customize site metadata");
    println!("  - Write posts in posts/, then run `bramble build` or `bramble dev`");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("bramble.yml");
    if config_path.exists() {
        println!("bramble.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_site(root: &Path) -> Result<()> {
    let posts = root.join("posts");
    let style = root.join("style");
    let img = root.join("img");

    for dir in [&posts, &style, &img] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let sample = posts.join("welcome.md");
    if !sample.exists() {
        fs::write(&sample, sample_post())?;
        println!("Created {:?}", sample);
    }

    let stylesheet = style.join("style.css");
    if !stylesheet.exists() {
        fs::write(&stylesheet, DEFAULT_STYLE)?;
        println!("Created {:?}", stylesheet);
    }

    Ok(())
}

fn sample_post() -> String {
    r#"---
title: Welcome to bramble
description: Quick start guide
date: 2025-01-01
tags: [bramble, intro]
---

This paragraph is your excerpt. End it early with the marker below, or
bramble will take the first paragraph automatically.

<!--more-->

Everything after the marker only appears on the post page. Run:

```bash
bramble build
bramble dev
```
"#
    .to_string()
}
