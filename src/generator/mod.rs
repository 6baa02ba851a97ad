//! Generator module - writes every route to the public directory

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;
use tera::Context;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::content::PartialPost;
use crate::helpers::{escape_xml, full_url_for, now_rfc2822, rfc2822_date};
use crate::pages::{BlogIndexProps, HomeProps, PageAssembler, PostProps, Route};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// What a build produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of post pages written
    pub posts: usize,
    /// Number of HTML pages written, including the 404 page
    pub pages: usize,
    /// Number of static files copied
    pub assets: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new(&blog.config)?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self, assembler: &PageAssembler) -> Result<BuildReport> {
        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        let mut report = BuildReport {
            assets: self.copy_static_assets()?,
            ..Default::default()
        };

        self.generate_home(&assembler.home())?;

        let index = assembler.blog_index()?;
        self.generate_blog_index(&index)?;

        report.posts = self.generate_post_pages(assembler).await?;

        self.generate_not_found()?;
        report.pages = report.posts + 3;

        if self.blog.config.feed.enable {
            self.generate_feed(&index)?;
        }

        Ok(report)
    }

    /// Create a base context with common variables
    fn create_base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", self.blog.config.as_ref());
        context.insert("current_year", &chrono::Utc::now().year().to_string());
        context.insert("has_alert", &false);
        context.insert("source_link", &None::<String>);
        context
    }

    fn generate_home(&self, props: &HomeProps) -> Result<()> {
        let mut context = self.create_base_context();
        context.insert("page_title", &props.page_title);

        let html = self.renderer.render("home.html", &context)?;
        self.write_route(&Route::Home, &html)
    }

    fn generate_blog_index(&self, props: &BlogIndexProps) -> Result<()> {
        let mut context = self.create_base_context();
        context.insert("page_title", &props.page_title);
        context.insert("hero_post", &props.hero_post);
        context.insert("more_posts", &props.more_posts);

        let html = self.renderer.render("blog.html", &context)?;
        self.write_route(&Route::BlogIndex, &html)
    }

    /// Resolve and write every post page; posts are rendered concurrently
    async fn generate_post_pages(&self, assembler: &PageAssembler) -> Result<usize> {
        let slugs = assembler.static_paths()?;
        let mut tasks = JoinSet::new();

        for slug in slugs {
            let assembler = assembler.clone();
            tasks.spawn(async move {
                let props = assembler.blog_post(&slug).await;
                (slug, props)
            });
        }

        let mut count = 0;
        // Dropping the set on error aborts the remaining tasks
        while let Some(joined) = tasks.join_next().await {
            let (slug, props) = joined?;
            let props = props.with_context(|| format!("Failed to build post `{}`", slug))?;
            self.generate_post_page(&slug, &props)?;
            count += 1;
        }

        tracing::info!("Generated {} post pages", count);
        Ok(count)
    }

    fn generate_post_page(&self, slug: &str, props: &PostProps) -> Result<()> {
        let mut context = self.create_base_context();
        context.insert("page_title", &props.page_title);
        context.insert("post", &props.post);
        context.insert("has_alert", &props.source_link.is_some());
        context.insert("source_link", &props.source_link);

        let html = self.renderer.render("post.html", &context)?;
        self.write_route(&Route::BlogPost(slug.to_string()), &html)
    }

    /// Generate the page served for unknown URLs
    fn generate_not_found(&self) -> Result<()> {
        let mut context = self.create_base_context();
        context.insert("page_title", "404: This page could not be found");

        let html = self.renderer.render("404.html", &context)?;
        self.write_file(&self.blog.public_dir.join("404.html"), &html)
    }

    /// Generate RSS 2.0 feed of the newest posts
    fn generate_feed(&self, index: &BlogIndexProps) -> Result<()> {
        let config = &self.blog.config;
        let posts: Vec<&PartialPost> = index
            .hero_post
            .iter()
            .chain(index.more_posts.iter())
            .take(config.feed.limit)
            .collect();

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
        feed.push_str("\n<channel>\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link>{}</link>\n",
            escape_xml(&full_url_for(config, ""))
        ));
        feed.push_str(&format!(
            "  <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            escape_xml(&full_url_for(config, &config.feed.path))
        ));
        feed.push_str(&format!(
            "  <description>{}</description>\n",
            escape_xml(&config.description)
        ));
        feed.push_str(&format!(
            "  <language>{}</language>\n",
            escape_xml(&config.language)
        ));
        feed.push_str(&format!("  <lastBuildDate>{}</lastBuildDate>\n", now_rfc2822()));

        for post in posts {
            let (Some(slug), Some(title)) = (post.slug.as_deref(), post.title.as_deref()) else {
                continue;
            };
            let link = full_url_for(config, &Route::BlogPost(slug.to_string()).url_path());

            feed.push_str("  <item>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(title)));
            feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&link)));
            feed.push_str(&format!("    <guid>{}</guid>\n", escape_xml(&link)));
            if let Some(description) = &post.description {
                feed.push_str(&format!(
                    "    <description>{}</description>\n",
                    escape_xml(description)
                ));
            }
            if let Some(author) = &post.author {
                feed.push_str(&format!(
                    "    <dc:creator xmlns:dc=\"http://purl.org/dc/elements/1.1/\">{}</dc:creator>\n",
                    escape_xml(&author.name)
                ));
            }
            if let Some(date) = post.date.as_deref().and_then(rfc2822_date) {
                feed.push_str(&format!("    <pubDate>{}</pubDate>\n", date));
            }
            feed.push_str("  </item>\n");
        }

        feed.push_str("</channel>\n</rss>\n");

        let output_path = self.blog.public_dir.join(&config.feed.path);
        self.write_file(&output_path, &feed)?;
        tracing::info!("Generated {}", config.feed.path);

        Ok(())
    }

    /// Copy the static directory (favicons, images, ...) verbatim
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }

    fn write_route(&self, route: &Route, html: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(route.output_path());
        self.write_file(&output_path, html)?;
        tracing::debug!("Generated {}: {:?}", route, output_path);
        Ok(())
    }

    fn write_file(&self, output_path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))
    }
}
