//! Print the stylesheet for highlighted code

use anyhow::{Context, Result};

use crate::Blog;

/// Print CSS for the configured highlight theme
pub fn run(blog: &Blog) -> Result<()> {
    let theme = &blog.config.markdown.highlight.theme;
    let css = blog
        .renderer()
        .stylesheet()
        .with_context(|| format!("Failed to build CSS for theme {}", theme))?;
    print!("{}", css);
    Ok(())
}
