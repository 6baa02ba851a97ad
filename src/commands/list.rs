//! List site content

use anyhow::Result;

use crate::content::FieldSet;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, fields: Option<FieldSet>, json: bool) -> Result<()> {
    let assembler = blog.assembler()?;

    match content_type {
        "post" | "posts" => {
            let posts = assembler
                .loader()
                .get_all_posts(fields.unwrap_or(FieldSet::PREVIEW))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}) in {:?}:", posts.len(), assembler.loader().posts_dir());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.as_deref().unwrap_or("-"),
                    post.title.as_deref().unwrap_or("-"),
                    post.slug.as_deref().unwrap_or("-")
                );
            }
        }
        "route" | "routes" => {
            let routes = assembler.routes()?;
            if json {
                let paths: Vec<String> = routes.iter().map(|r| r.to_string()).collect();
                println!("{}", serde_json::to_string_pretty(&paths)?);
                return Ok(());
            }
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {:<40} -> {}", route, route.output_path().display());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route",
                content_type
            );
        }
    }

    Ok(())
}
