//! List blog content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Post;
use crate::Blog;

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let posts = blog.store()?.list();

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  #{} {} - {} ({} views)",
                    post.id,
                    post.created_time.format("%Y-%m-%d"),
                    post.title,
                    post.views
                );
                if !post.excerpt.is_empty() {
                    println!("      {}", post.excerpt.trim().replace('\n', " "));
                }
            }
        }
        "tag" | "tags" => {
            let tags = count_by(&posts, |post| {
                post.tags.iter().map(|t| t.name.clone()).collect()
            });
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_by(&posts, |post| vec![post.category.name.clone()]);
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Usage counts, most used first, ties by name
fn count_by<F>(posts: &[Post], names: F) -> Vec<(String, usize)>
where
    F: Fn(&Post) -> Vec<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for name in names(post) {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
