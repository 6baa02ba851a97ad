//! CLI entry point for blogsmith

use anyhow::Result;
use blogsmith::content::FieldSet;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogsmith")]
#[command(version)]
#[command(about = "A static blog generator for markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(alias = "g", alias = "generate")]
    Build,

    /// Delete the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, route)
        #[arg(default_value = "post")]
        r#type: String,

        /// Comma-separated post fields to load, e.g. slug,title,coverImage
        #[arg(short, long)]
        fields: Option<FieldSet>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogsmith=debug,info"
    } else {
        "blogsmith=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let blog = blogsmith::Blog::new(&base_dir)?;
            tracing::info!("Building site in {:?}", blog.base_dir);
            let report = blog.build().await?;
            println!(
                "Generated {} pages into {:?}",
                report.pages, blog.public_dir
            );
        }

        Commands::Clean => {
            let blog = blogsmith::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List {
            r#type,
            fields,
            json,
        } => {
            let blog = blogsmith::Blog::new(&base_dir)?;
            blogsmith::commands::list::run(&blog, &r#type, fields, json)?;
        }

        Commands::Version => {
            println!("blogsmith version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
