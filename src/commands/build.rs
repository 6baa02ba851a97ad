//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::{BuildReport, Generator};
use crate::Blog;

/// Resolve every route and write the site
pub async fn run(blog: &Blog) -> Result<BuildReport> {
    let start = Instant::now();

    let assembler = blog.assembler()?;
    let generator = Generator::new(blog)?;
    let report = generator.generate(&assembler).await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages ({} posts, {} static files) in {:.2}s",
        report.pages,
        report.posts,
        report.assets,
        duration.as_secs_f64()
    );

    Ok(report)
}
