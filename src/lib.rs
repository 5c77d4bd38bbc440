//! blog-rs: blog posts with Markdown rendering, excerpts and a table of contents
//!
//! The core is [`content::MarkdownRenderer`], which turns a post body into HTML
//! with highlighted code and anchored headings, a table of contents, and a short
//! plain text excerpt. [`content::Post`] memoizes the rendered body per instance
//! and fills its excerpt on save; [`store::PostStore`] persists posts as JSON.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod store;

use std::path::{Path, PathBuf};

use error::Result;

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "blog.yml";

/// A blog rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post store
    pub data_dir: PathBuf,
}

impl Blog {
    /// Open a blog from a directory, reading `blog.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let data_dir = base_dir.join(&config.data_dir);

        Ok(Self {
            config,
            base_dir,
            data_dir,
        })
    }

    /// Renderer configured for this blog
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.markdown)
    }

    /// Open the post store
    pub fn store(&self) -> Result<store::PostStore> {
        Ok(store::PostStore::open(&self.data_dir)?
            .with_excerpt_length(self.config.markdown.excerpt_length))
    }
}
