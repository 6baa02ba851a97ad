//! Error types shared by the content pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::content::{FrontMatterError, RenderError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    #[error("Malformed content in {path:?}: {source}")]
    MalformedContent {
        path: PathBuf,
        source: FrontMatterError,
    },

    #[error("Duplicate slug `{slug}`: {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Cannot render markdown: {0}")]
    Render(#[from] RenderError),

    #[error("Unknown highlight theme: {0}")]
    UnknownTheme(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Whether this error means the requested post does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
