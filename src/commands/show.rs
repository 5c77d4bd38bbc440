//! Show a rendered post

use anyhow::Result;

use crate::Blog;

/// Print a post's rendered body, optionally preceded by its TOC
pub fn run(blog: &Blog, id: u64, with_toc: bool) -> Result<()> {
    let renderer = blog.renderer();
    let post = blog.store()?.get(id)?;

    println!("{} [{}] by {}", post.title, post.category, post.author);
    if with_toc {
        let toc = post.toc(&renderer);
        if toc.is_empty() {
            println!("(no table of contents)");
        } else {
            println!("<ul>{}</ul>", toc);
        }
    }
    println!("{}", post.body_html(&renderer));
    Ok(())
}
