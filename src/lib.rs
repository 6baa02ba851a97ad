//! blogsmith: a static blog generator
//!
//! Markdown posts with front-matter are read from a content directory,
//! assembled into typed page props and rendered through embedded Tera
//! templates into a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{MarkdownRenderer, PostLoader};
use pages::PageAssembler;

/// The blog being built
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: Arc<config::SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: Into<PathBuf>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.into();
        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config: Arc::new(config),
            base_dir,
            posts_dir,
            static_dir,
            public_dir,
        }
    }

    /// Post loader over this blog's content directory
    pub fn loader(&self) -> PostLoader {
        PostLoader::new(&self.base_dir, &self.posts_dir)
    }

    /// Page assembler wired to this blog's loader, renderer and config
    pub fn assembler(&self) -> Result<PageAssembler> {
        let highlight = &self.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number)?;
        Ok(PageAssembler::new(
            Arc::clone(&self.config),
            self.loader(),
            Arc::new(renderer),
        ))
    }

    /// Generate the static site
    pub async fn build(&self) -> anyhow::Result<generator::BuildReport> {
        commands::build::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
