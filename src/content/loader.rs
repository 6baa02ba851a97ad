//! Post loader - reads posts from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::{FrontMatter, FrontMatterError};
use super::post::{FieldSet, OgImage, PartialPost, Post};
use crate::error::{Error, Result};

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Loads posts from a flat directory of markdown files
#[derive(Debug, Clone)]
pub struct PostLoader {
    /// Site base directory; post paths are reported relative to it
    base_dir: PathBuf,
    posts_dir: PathBuf,
}

impl PostLoader {
    /// Create a new post loader
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(base_dir: P, posts_dir: Q) -> Self {
        Self {
            base_dir: base_dir.into(),
            posts_dir: posts_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load one post, keeping only the requested fields
    pub fn get_post_by_slug(&self, slug: &str, fields: FieldSet) -> Result<PartialPost> {
        Ok(self.load_post_by_slug(slug)?.select(fields))
    }

    /// Load every post, newest first, keeping only the requested fields
    pub fn get_all_posts(&self, fields: FieldSet) -> Result<Vec<PartialPost>> {
        Ok(self
            .load_all()?
            .iter()
            .map(|post| post.select(fields))
            .collect())
    }

    /// Slugs of every post in the content directory, in file name order
    pub fn slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .post_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    /// Load a complete post by slug
    pub fn load_post_by_slug(&self, slug: &str) -> Result<Post> {
        let path = self.find_post_file(slug).ok_or_else(|| Error::NotFound {
            slug: slug.to_string(),
        })?;
        self.load_post(slug, &path)
    }

    /// Load all complete posts, sorted by date descending
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let mut posts = self
            .post_files()?
            .into_iter()
            .map(|(slug, path)| self.load_post(&slug, &path))
            .collect::<Result<Vec<_>>>()?;

        // Stable sort: posts sharing a date keep file name order
        posts.sort_by(|a, b| b.published.cmp(&a.published));

        Ok(posts)
    }

    /// Locate the file backing a slug
    fn find_post_file(&self, slug: &str) -> Option<PathBuf> {
        if !is_valid_slug(slug) {
            return None;
        }
        MARKDOWN_EXTENSIONS
            .iter()
            .map(|ext| self.posts_dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    /// Enumerate (slug, path) for every markdown file, rejecting duplicate slugs
    fn post_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
                continue;
            };
            if !is_valid_slug(slug) {
                tracing::debug!("Skipping hidden file {:?}", path);
                continue;
            }
            if slug::slugify(slug) != slug {
                tracing::warn!("Post file name {:?} is not a URL-friendly slug", path);
            }

            if let Some(first) = seen.get(slug) {
                return Err(Error::DuplicateSlug {
                    slug: slug.to_string(),
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(slug.to_string(), path.to_path_buf());
            files.push((slug.to_string(), path.to_path_buf()));
        }

        Ok(files)
    }

    /// Load a single post from a file
    fn load_post(&self, slug: &str, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let malformed = |source: FrontMatterError| Error::MalformedContent {
            path: path.to_path_buf(),
            source,
        };

        let (fm, body) = FrontMatter::parse(&raw).map_err(malformed)?;
        let published = fm.parse_date().map_err(malformed)?;

        let author = fm
            .author
            .ok_or(FrontMatterError::MissingField("author"))
            .map_err(malformed)?;
        let title = FrontMatter::required(fm.title, "title").map_err(malformed)?;
        let description =
            FrontMatter::required(fm.description, "description").map_err(malformed)?;
        let date = FrontMatter::required(fm.date, "date").map_err(malformed)?;
        let cover_image =
            FrontMatter::required(fm.cover_image, "coverImage").map_err(malformed)?;

        // Default to the source path relative to the site root
        let source_path = path
            .strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let path_field = fm.path.unwrap_or(source_path);

        let og_image = fm.og_image.unwrap_or_else(|| OgImage {
            url: cover_image.clone(),
        });

        tracing::debug!("Loaded post {:?} ({})", slug, date);

        Ok(Post {
            slug: slug.to_string(),
            title,
            description,
            date,
            published,
            author,
            cover_image,
            path: path_field,
            og_image,
            content: body.to_string(),
            source: path.to_path_buf(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// A slug must name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}
