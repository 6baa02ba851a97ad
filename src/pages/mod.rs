//! Page assembler - resolves each route into the props its template needs
//!
//! Every route is an independent pipeline over the read-only content store,
//! so routes may be resolved in any order or concurrently.

mod route;

pub use route::Route;

use serde::Serialize;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{FieldSet, MarkdownRenderer, PartialPost, PostLoader};
use crate::error::Result;

pub const HOME_TITLE: &str = "Home";
pub const BLOG_TITLE: &str = "Blog";

/// Props for the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomeProps {
    pub page_title: String,
}

/// Props for the blog index
#[derive(Debug, Clone, Serialize)]
pub struct BlogIndexProps {
    pub page_title: String,
    /// Most recent post, if any
    pub hero_post: Option<PartialPost>,
    /// Every other post, newest first
    pub more_posts: Vec<PartialPost>,
}

/// Props for a single post page
#[derive(Debug, Clone, Serialize)]
pub struct PostProps {
    pub page_title: String,
    /// `content` holds rendered HTML
    pub post: PartialPost,
    pub source_link: Option<String>,
}

/// Builds prop bundles for every route
#[derive(Clone)]
pub struct PageAssembler {
    config: Arc<SiteConfig>,
    loader: PostLoader,
    renderer: Arc<MarkdownRenderer>,
}

impl PageAssembler {
    pub fn new(
        config: Arc<SiteConfig>,
        loader: PostLoader,
        renderer: Arc<MarkdownRenderer>,
    ) -> Self {
        Self {
            config,
            loader,
            renderer,
        }
    }

    pub fn loader(&self) -> &PostLoader {
        &self.loader
    }

    /// Home has no data dependency
    pub fn home(&self) -> HomeProps {
        HomeProps {
            page_title: HOME_TITLE.to_string(),
        }
    }

    /// Blog index: preview fields only, split into hero and the rest
    pub fn blog_index(&self) -> Result<BlogIndexProps> {
        let posts = self.loader.get_all_posts(FieldSet::PREVIEW)?;
        let (hero_post, more_posts) = split_hero(posts);
        Ok(BlogIndexProps {
            page_title: BLOG_TITLE.to_string(),
            hero_post,
            more_posts,
        })
    }

    /// A post page with its body rendered to HTML
    pub async fn blog_post(&self, slug: &str) -> Result<PostProps> {
        let mut post = self.loader.get_post_by_slug(slug, FieldSet::FULL)?;

        let markdown = post.content.take().unwrap_or_default();
        let renderer = Arc::clone(&self.renderer);
        let html =
            tokio::task::spawn_blocking(move || renderer.render_to_html(&markdown)).await??;
        post.content = Some(html);

        let source_link = post
            .path
            .as_deref()
            .and_then(|path| self.config.source_link(path));

        Ok(PostProps {
            page_title: post.title.clone().unwrap_or_default(),
            post,
            source_link,
        })
    }

    /// Every post route that gets a page; anything else is a 404
    pub fn static_paths(&self) -> Result<Vec<String>> {
        let posts = self.loader.get_all_posts(FieldSet::SLUG)?;
        Ok(posts.into_iter().filter_map(|post| post.slug).collect())
    }

    /// The complete route table: home, blog index, then one route per post
    pub fn routes(&self) -> Result<Vec<Route>> {
        let mut routes = vec![Route::Home, Route::BlogIndex];
        routes.extend(self.static_paths()?.into_iter().map(Route::BlogPost));
        Ok(routes)
    }
}

/// Split newest-first posts into the hero post and the remainder
pub fn split_hero(posts: Vec<PartialPost>) -> (Option<PartialPost>, Vec<PartialPost>) {
    let mut posts = posts.into_iter();
    let hero = posts.next();
    (hero, posts.collect())
}
