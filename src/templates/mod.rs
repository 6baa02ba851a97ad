//! Built-in site templates using Tera template engine
//!
//! Templates are embedded in the binary. They only lay out the props built by
//! the page assembler; no content decisions happen here.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{format_post_date, html_escape, join_root};

/// Template renderer with embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped explicitly with `escape_text`; rendered post bodies
        // are trusted HTML and must pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            (
                "partials/macros.html",
                include_str!("site/partials/macros.html"),
            ),
            ("partials/meta.html", include_str!("site/partials/meta.html")),
            (
                "partials/alert.html",
                include_str!("site/partials/alert.html"),
            ),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("escape_text", escape_text_filter);
        tera.register_filter("post_date", post_date_filter);
        tera.register_function("url_for", make_url_for(config.root.clone()));

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape HTML special characters
fn escape_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_text", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: format a post date like "June 1, 2021"
fn post_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("post_date", "value", String, value);
    Ok(tera::Value::String(format_post_date(&s)))
}

/// Tera function: `url_for(path="blog/")` prefixes the site root
fn make_url_for(root: String) -> impl tera::Function {
    move |args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let path = match args.get("path") {
            Some(val) => tera::try_get_value!("url_for", "path", String, val),
            None => return Err(tera::Error::msg("`url_for` requires a `path` argument")),
        };
        Ok(tera::Value::String(join_root(&root, &path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Author, PartialPost};

    fn base_context(config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("site", config);
        context.insert("current_year", "2021");
        context.insert("has_alert", &false);
        context.insert("source_link", &None::<String>);
        context
    }

    fn preview(slug: &str) -> PartialPost {
        PartialPost {
            slug: Some(slug.to_string()),
            title: Some(format!("{} & friends", slug)),
            description: Some("A description".to_string()),
            date: Some("2021-06-01".to_string()),
            author: Some(Author {
                name: "Jane".to_string(),
                picture: "/jane.png".to_string(),
            }),
            cover_image: Some("/cover.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_home() {
        let config = SiteConfig {
            title: "Dev Notes".to_string(),
            github_url: "https://github.com/jane".to_string(),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "Home");

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains("<title>Dev Notes: "));
        assert!(html.contains(r#"href="/blog/""#));
        assert!(html.contains("https://github.com/jane"));
    }

    #[test]
    fn test_render_blog_index() {
        let config = SiteConfig::default();
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "Blog");
        context.insert("hero_post", &Some(preview("newest")));
        context.insert("more_posts", &vec![preview("older")]);

        let html = renderer.render("blog.html", &context).unwrap();
        assert!(html.contains(r#"href="/blog/newest/""#));
        assert!(html.contains(r#"href="/blog/older/""#));
        assert!(html.contains("More Posts"));
        assert!(html.contains("newest &amp; friends"));
        assert!(html.contains("June 1, 2021"));
        assert!(html.contains(r#"alt="Cover Image for older &amp; friends""#));
    }

    #[test]
    fn test_render_blog_index_without_posts() {
        let config = SiteConfig::default();
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "Blog");
        context.insert("hero_post", &None::<PartialPost>);
        context.insert("more_posts", &Vec::<PartialPost>::new());

        let html = renderer.render("blog.html", &context).unwrap();
        assert!(!html.contains("More Posts"));
    }

    #[test]
    fn test_config_values_are_escaped() {
        let config = SiteConfig {
            language: "en\"><script>".to_string(),
            github_url: "https://github.com/jane\" onclick=\"x".to_string(),
            card_image: "/card.png?a=1&b=2".to_string(),
            analytics_id: Some("G-1'</script><script>alert(1)//".to_string()),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "Home");

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains(r#"<html lang="en&quot;&gt;&lt;script&gt;">"#));
        assert!(html.contains(r#"href="https://github.com/jane&quot; onclick=&quot;x""#));
        assert!(html.contains(r#"content="/card.png?a=1&amp;b=2""#));
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#"gtag/js?id=G-1%27%3C/script%3E"#));
    }

    #[test]
    fn test_site_og_tags_on_every_page() {
        let config = SiteConfig {
            description: "Notes & more".to_string(),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "404: This page could not be found");

        let html = renderer.render("404.html", &context).unwrap();
        assert!(html.contains(r#"<meta property="og:description" content="Notes &amp; more">"#));
        assert!(html.contains(r#"<meta property="og:image" content="/assets/card-image.png">"#));
    }

    #[test]
    fn test_post_overrides_site_og_tags() {
        let config = SiteConfig::default();
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        let mut post = preview("hello");
        post.og_image = Some(crate::content::OgImage {
            url: "/og/hello.png".to_string(),
        });
        post.content = Some("<p>Body</p>".to_string());
        context.insert("page_title", "hello");
        context.insert("post", &post);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains(r#"<meta property="og:image" content="/og/hello.png">"#));
        assert_eq!(html.matches(r#"property="og:image""#).count(), 1);
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_url_for_uses_root() {
        let config = SiteConfig {
            root: "/sub/".to_string(),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();
        let mut context = base_context(&config);
        context.insert("page_title", "Home");

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains(r#"href="/sub/blog/""#));
    }
}
