//! Replace the body of an existing post

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::Blog;

/// Load a post, swap in a new body and save it
///
/// The stored excerpt is kept as it is.
pub fn run(blog: &Blog, id: u64, body: &Path) -> Result<()> {
    let markdown =
        fs::read_to_string(body).with_context(|| format!("Failed to read {:?}", body))?;

    let renderer = blog.renderer();
    let mut store = blog.store()?;
    let mut post = store.get(id)?;
    post.body = markdown;
    store.save(&mut post, &renderer)?;

    println!("Updated post {}: {}", post.id, post.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Category, Post};

    #[test]
    fn test_edit_keeps_excerpt() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let renderer = blog.renderer();

        let mut store = blog.store().unwrap();
        let mut post = Post::new("Post", "Old body", Category::new("c"), "a");
        let id = store.save(&mut post, &renderer).unwrap();

        let body = dir.path().join("new.md");
        fs::write(&body, "## New body").unwrap();
        run(&blog, id, &body).unwrap();

        let post = blog.store().unwrap().get(id).unwrap();
        assert_eq!(post.body, "## New body");
        assert_eq!(post.excerpt, "Old body\n");
        assert!(post.toc(&renderer).contains("#new-body"));
    }

    #[test]
    fn test_edit_missing_post() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let body = dir.path().join("new.md");
        fs::write(&body, "x").unwrap();
        assert!(run(&blog, 7, &body).is_err());
    }
}
