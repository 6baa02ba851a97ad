//! Content module - the markdown content store and its rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use loader::PostLoader;
pub use markdown::{MarkdownRenderer, RenderError, DEFAULT_THEME};
pub use post::{Author, Field, FieldSet, OgImage, PartialPost, Post};
