//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_THEME;

/// Main site configuration
///
/// Loaded once at start-up and handed to the page assembler and the view
/// layer explicitly; nothing reads it from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub language: String,
    pub card_image: String,

    // URL
    pub url: String,
    pub root: String,

    // Social
    pub twitter_handle: String,
    pub github_url: String,
    pub twitter_url: String,

    /// Prefix for a post's `path` to link to its source
    pub source_url: String,
    pub analytics_id: Option<String>,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            subtitle: "Notes for full-stack developers".to_string(),
            description: String::new(),
            language: "en".to_string(),
            card_image: "/assets/card-image.png".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            twitter_handle: String::new(),
            github_url: String::new(),
            twitter_url: String::new(),

            source_url: String::new(),
            analytics_id: None,

            posts_dir: "_posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Link to a post's source, or None when no source URL is configured
    pub fn source_link(&self, post_path: &str) -> Option<String> {
        if self.source_url.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.source_url.trim_end_matches('/'),
            post_path.trim_start_matches('/')
        ))
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            line_number: true,
        }
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub path: String,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "feed.xml".to_string(),
            limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.root, "/");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert!(config.feed.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Dev Notes
subtitle: Tutorials and tips
github_url: https://github.com/jane
highlight:
  line_number: false
feed:
  limit: 5
unknown_key: ignored
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Dev Notes");
        assert_eq!(config.github_url, "https://github.com/jane");
        assert!(!config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.feed.limit, 5);
        assert_eq!(config.feed.path, "feed.xml");
    }

    #[test]
    fn test_source_link() {
        let mut config = SiteConfig::default();
        assert_eq!(config.source_link("_posts/a.md"), None);

        config.source_url = "https://github.com/jane/blog/blob/main/".to_string();
        assert_eq!(
            config.source_link("/_posts/a.md").as_deref(),
            Some("https://github.com/jane/blog/blob/main/_posts/a.md")
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SiteConfig::load("/nonexistent/_config.yml").is_err());
    }
}
