//! CLI entry point for blog-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_rs::commands;

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(version)]
#[command(about = "Blog posts with Markdown rendering, excerpts and a table of contents", long_about = None)]
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
    /// Render a markdown file
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Print the table of contents
        #[arg(long)]
        toc: bool,

        /// Print the plain text excerpt
        #[arg(long, conflicts_with = "toc")]
        excerpt: bool,

        /// Excerpt length in characters
        #[arg(long, requires = "excerpt")]
        length: Option<usize>,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Markdown file holding the body
        #[arg(short, long)]
        body: PathBuf,

        /// Category of the post
        #[arg(long)]
        category: String,

        /// Author of the post
        #[arg(short, long)]
        author: String,

        /// Tags, repeat for more than one
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Replace the body of a post
    Edit {
        /// Post id
        id: u64,

        /// Markdown file holding the new body
        #[arg(short, long)]
        body: PathBuf,
    },

    /// Show a rendered post
    Show {
        /// Post id
        id: u64,

        /// Also print the table of contents
        #[arg(long)]
        toc: bool,
    },

    /// Count a view of a post
    View {
        /// Post id
        id: u64,
    },

    /// List blog information
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the stylesheet for highlighted code
    Css,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    if let Commands::Version = cli.command {
        println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let blog = blog_rs::Blog::new(&base_dir)
        .with_context(|| format!("Failed to open blog in {:?}", base_dir))?;

    match cli.command {
        Commands::Render {
            file,
            toc,
            excerpt,
            length,
        } => {
            let options = commands::render::RenderOptions {
                toc,
                excerpt,
                length,
            };
            commands::render::run(&blog, &file, options)?;
        }

        Commands::New {
            title,
            body,
            category,
            author,
            tags,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            commands::new::create_post(
                &blog,
                &commands::new::NewPost {
                    title: &title,
                    body: &body,
                    category: &category,
                    author: &author,
                    tags: &tags,
                },
            )?;
        }

        Commands::Edit { id, body } => {
            commands::edit::run(&blog, id, &body)?;
        }

        Commands::Show { id, toc } => {
            commands::show::run(&blog, id, toc)?;
        }

        Commands::View { id } => {
            commands::view::run(&blog, id)?;
        }

        Commands::List { r#type } => {
            commands::list::run(&blog, &r#type)?;
        }

        Commands::Css => {
            commands::css::run(&blog)?;
        }

        Commands::Version => {}
    }

    Ok(())
}
