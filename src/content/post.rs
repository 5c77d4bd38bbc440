//! Post, Category and Tag models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::markdown::{ContentRenderer, RichContent};

/// Longest title a post may have
pub const TITLE_MAX_LENGTH: usize = 70;

/// Longest category or tag name
pub const NAME_MAX_LENGTH: usize = 100;

/// A post category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A post tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A blog post
#[derive(Debug, Serialize, Deserialize)]
pub struct Post {
    /// Store id, 0 until the post is first saved
    #[serde(default)]
    pub id: u64,

    /// Post title
    pub title: String,

    /// Raw markdown content
    pub body: String,

    /// Creation date
    pub created_time: DateTime<Local>,

    /// Set on every save
    pub modified_time: DateTime<Local>,

    /// Plain text summary, generated on save when empty
    #[serde(default)]
    pub excerpt: String,

    pub category: Category,

    #[serde(default)]
    pub tags: Vec<Tag>,

    pub author: String,

    #[serde(default)]
    pub views: u64,

    /// Rendered body and TOC, filled on first access
    #[serde(skip)]
    rich_content: OnceLock<RichContent>,
}

impl Post {
    /// Create a new, unsaved post
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category: Category,
        author: impl Into<String>,
    ) -> Self {
        let now = Local::now();
        Self {
            id: 0,
            title: title.into(),
            body: body.into(),
            created_time: now,
            modified_time: now,
            excerpt: String::new(),
            category,
            tags: Vec::new(),
            author: author.into(),
            views: 0,
            rich_content: OnceLock::new(),
        }
    }

    /// Add tags to the post
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Tag::new));
        self
    }

    /// Rendered body and TOC
    ///
    /// Rendered once per instance. Editing `body` afterwards does not refresh it;
    /// load the post again to see the new body rendered.
    pub fn rich_content<R: ContentRenderer + ?Sized>(&self, renderer: &R) -> &RichContent {
        self.rich_content.get_or_init(|| {
            tracing::debug!("Rendering post {} ({})", self.id, self.title);
            renderer.render_full(&self.body)
        })
    }

    /// Rendered body HTML
    pub fn body_html<R: ContentRenderer + ?Sized>(&self, renderer: &R) -> &str {
        &self.rich_content(renderer).content
    }

    /// Table of contents items, empty when the body has no headings
    pub fn toc<R: ContentRenderer + ?Sized>(&self, renderer: &R) -> &str {
        &self.rich_content(renderer).toc
    }

    /// Whether the rendered content has been computed for this instance
    pub fn is_rendered(&self) -> bool {
        self.rich_content.get().is_some()
    }

    /// Save hook: stamp the modification time and fill in a missing excerpt
    ///
    /// An excerpt that is already set is never regenerated, even if the body changed.
    pub fn before_save<R: ContentRenderer + ?Sized>(
        &mut self,
        renderer: &R,
        excerpt_length: usize,
    ) {
        self.modified_time = Local::now();
        if self.excerpt.is_empty() {
            self.excerpt = renderer.render_excerpt(&self.body, excerpt_length);
        }
    }

    /// Count one more view
    pub fn increase_views(&mut self) {
        self.views += 1;
    }
}

/// A clone is a new instance: it starts without rendered content
impl Clone for Post {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone(),
            created_time: self.created_time,
            modified_time: self.modified_time,
            excerpt: self.excerpt.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            author: self.author.clone(),
            views: self.views,
            rich_content: OnceLock::new(),
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
