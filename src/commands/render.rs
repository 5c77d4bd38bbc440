//! Render a markdown file without touching the store

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::ContentRenderer;
use crate::Blog;

/// What to print for a rendered file
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the table of contents instead of the body
    pub toc: bool,
    /// Print the excerpt instead of the body
    pub excerpt: bool,
    /// Excerpt length, the configured one when absent
    pub length: Option<usize>,
}

/// Render a markdown file to stdout
pub fn run(blog: &Blog, path: &Path, options: RenderOptions) -> Result<()> {
    let markdown =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    println!("{}", render(blog, &markdown, options));
    Ok(())
}

fn render(blog: &Blog, markdown: &str, options: RenderOptions) -> String {
    let renderer = blog.renderer();
    if options.excerpt {
        let length = options
            .length
            .unwrap_or(blog.config.markdown.excerpt_length);
        renderer.render_excerpt(markdown, length)
    } else if options.toc {
        renderer.render_full(markdown).toc
    } else {
        renderer.render_full(markdown).content
    }
}
