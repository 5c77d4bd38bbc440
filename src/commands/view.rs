//! Count a view of a post

use anyhow::Result;

use crate::Blog;

/// Increase a post's view counter
pub fn run(blog: &Blog, id: u64) -> Result<()> {
    let views = blog.store()?.increase_views(id)?;
    println!("Post {} has {} views", id, views);
    Ok(())
}
