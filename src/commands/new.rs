//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{Category, Post};
use crate::Blog;

/// Fields of a post given on the command line
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub body: &'a Path,
    pub category: &'a str,
    pub author: &'a str,
    pub tags: &'a [String],
}

/// Create a post from a markdown file and save it
pub fn create_post(blog: &Blog, new: &NewPost) -> Result<u64> {
    let body = fs::read_to_string(new.body)
        .with_context(|| format!("Failed to read {:?}", new.body))?;

    let mut post = Post::new(new.title, body, Category::new(new.category), new.author)
        .with_tags(new.tags.iter().map(String::as_str));

    let renderer = blog.renderer();
    let mut store = blog.store()?;
    let id = store.save(&mut post, &renderer)?;

    println!("Created post {}: {}", id, post.title);
    Ok(id)
}
