//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the bramble.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Ordered plugin entries, consumed once when the build pipeline is
    /// assembled. Order is emission order.
    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginEntry>,

    /// Ordered passthrough copy rules
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<PassthroughRule>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub posts: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// A configured plugin: identifier plus its options struct.
///
/// Unknown identifiers fail config load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PluginEntry {
    SyntaxHighlight(HighlightOptions),
    Rss(RssOptions),
    Seo(SeoOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightOptions {
    #[serde(default = "default_highlight_theme")]
    pub theme: String,
}

fn default_highlight_theme() -> String {
    String::from("InspiredGitHub")
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            theme: default_highlight_theme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RssOptions {
    #[serde(default = "default_rss_filename")]
    pub filename: String,

    /// Cap on the number of feed items (newest first); unset means all
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_rss_filename() -> String {
    String::from("rss.xml")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeoOptions {
    #[serde(default)]
    pub twitter_handle: Option<String>,

    #[serde(default)]
    pub default_image: Option<String>,
}

/// A passthrough copy rule: the source directory is copied verbatim into
/// the output under its own name. Watched rules are also dev-server watch
/// targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassthroughRule {
    pub source: PathBuf,

    #[serde(default = "default_true")]
    pub watch: bool,
}

fn default_plugins() -> Vec<PluginEntry> {
    vec![PluginEntry::SyntaxHighlight(HighlightOptions::default())]
}

fn default_passthrough() -> Vec<PassthroughRule> {
    vec![
        PassthroughRule {
            source: PathBuf::from("style"),
            watch: true,
        },
        PassthroughRule {
            source: PathBuf::from("img"),
            watch: true,
        },
    ]
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Get the posts directory, resolved relative to config file
    pub fn posts_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.posts)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Passthrough sources resolved relative to the config file, paired
    /// with the directory name they keep in the output
    pub fn passthrough_targets(&self) -> Vec<(PathBuf, PathBuf)> {
        self.passthrough
            .iter()
            .filter_map(|rule| {
                let name = rule.source.file_name()?;
                Some((self.resolve_path(&rule.source), PathBuf::from(name)))
            })
            .collect()
    }

    /// Watched passthrough sources, resolved (dev-server watch targets)
    pub fn watch_targets(&self) -> Vec<PathBuf> {
        self.passthrough
            .iter()
            .filter(|rule| rule.watch)
            .map(|rule| self.resolve_path(&rule.source))
            .collect()
    }

    /// First configured syntax highlighting entry, if any
    pub fn highlight_options(&self) -> Option<&HighlightOptions> {
        self.plugins.iter().find_map(|p| match p {
            PluginEntry::SyntaxHighlight(opts) => Some(opts),
            _ => None,
        })
    }

    /// First configured SEO entry, if any
    pub fn seo_options(&self) -> Option<&SeoOptions> {
        self.plugins.iter().find_map(|p| match p {
            PluginEntry::Seo(opts) => Some(opts),
            _ => None,
        })
    }

    /// Resolve an arbitrary path relative to the config file location
    pub fn resolve_relative(&self, path: &Path) -> PathBuf {
        self.resolve_path(path)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    if raw.is_empty() {
        return "/".to_string();
    }

    let mut s = raw.trim().to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    // Collapse duplicate slashes (but keep leading)
    while s.contains("//") {
        s = s.replace("//", "/");
        if !s.starts_with('/') {
            s.insert(0, '/');
        }
    }

    if s.is_empty() {
        "/".to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = r#"
site:
  title: "Test"
  author: "Tester"
  description: "Desc"
  url: "https://example.com"
paths:
  posts: "posts"
  output: "_site"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.server.port, 8000);
        assert_eq!(
            config.plugins,
            vec![PluginEntry::SyntaxHighlight(HighlightOptions::default())]
        );
        assert_eq!(config.passthrough.len(), 2);
        assert!(config.passthrough.iter().all(|r| r.watch));
    }

    #[test]
    fn test_plugin_list_preserves_order() {
        let yaml = format!(
            "{}{}",
            MINIMAL_YAML,
            r#"
plugins:
  - name: seo
    twitter_handle: "@tester"
  - name: syntax_highlight
    theme: "base16-ocean.light"
  - name: rss
    limit: 20
"#
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.plugins.len(), 3);
        assert!(matches!(config.plugins[0], PluginEntry::Seo(_)));
        assert!(matches!(config.plugins[1], PluginEntry::SyntaxHighlight(_)));
        assert!(matches!(config.plugins[2], PluginEntry::Rss(_)));

        let highlight = config.highlight_options().unwrap();
        assert_eq!(highlight.theme, "base16-ocean.light");

        let seo = config.seo_options().unwrap();
        assert_eq!(seo.twitter_handle.as_deref(), Some("@tester"));
    }

    #[test]
    fn test_unknown_plugin_identifier_is_rejected() {
        let yaml = format!(
            "{}{}",
            MINIMAL_YAML,
            r#"
plugins:
  - name: shortcodes
"#
        );
        assert!(serde_yaml::from_str::<Config>(&yaml).is_err());
    }

    #[test]
    fn test_rss_plugin_defaults() {
        let yaml = format!(
            "{}{}",
            MINIMAL_YAML,
            r#"
plugins:
  - name: rss
"#
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        match &config.plugins[0] {
            PluginEntry::Rss(opts) => {
                assert_eq!(opts.filename, "rss.xml");
                assert_eq!(opts.limit, None);
            }
            other => panic!("Expected rss plugin, got {:?}", other),
        }
    }

    #[test]
    fn test_passthrough_rules() {
        let yaml = format!(
            "{}{}",
            MINIMAL_YAML,
            r#"
passthrough:
  - source: "assets/fonts"
    watch: false
  - source: "img"
"#
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        let targets = config.passthrough_targets();
        assert_eq!(targets[0].1, PathBuf::from("fonts"));
        assert_eq!(targets[1].1, PathBuf::from("img"));

        let watched = config.watch_targets();
        assert_eq!(watched, vec![PathBuf::from("img")]);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("/blog/"), "/blog/");
        assert_eq!(normalize_base_url("//blog//"), "/blog/");
    }
}
