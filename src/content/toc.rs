//! Heading anchors and table of contents

use std::collections::HashSet;

use crate::helpers::html_escape;

/// One heading in the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 1 for `<h1>`
    pub level: u8,
    /// Anchor id set on the heading
    pub id: String,
    /// Plain heading text
    pub name: String,
    /// Headings nested under this one
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(level: u8, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            level,
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }
}

/// Hands out heading ids that are unique within one document
#[derive(Debug, Default)]
pub struct AnchorIds {
    used: HashSet<String>,
}

impl AnchorIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as taken, e.g. one written explicitly with `{#id}`
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    /// Slugify heading text and make the result unique
    ///
    /// # Examples
    /// ```
    /// use blog_rs::content::AnchorIds;
    ///
    /// let mut ids = AnchorIds::new();
    /// assert_eq!(ids.assign("Hello World"), "hello-world");
    /// assert_eq!(ids.assign("Hello, World!"), "hello-world_1");
    /// assert_eq!(ids.assign("hello world"), "hello-world_2");
    /// ```
    pub fn assign(&mut self, text: &str) -> String {
        let mut id = slug::slugify(text);
        while id.is_empty() || self.used.contains(&id) {
            id = match split_counter(&id) {
                Some((stem, n)) => format!("{}_{}", stem, n + 1),
                None => format!("{}_1", id),
            };
        }
        self.used.insert(id.clone());
        id
    }
}

/// Split `stem_N` into its parts
fn split_counter(id: &str) -> Option<(&str, u64)> {
    let (stem, count) = id.rsplit_once('_')?;
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    count.parse().ok().map(|n| (stem, n))
}

/// Nest a flat, document-ordered heading list by level
///
/// A heading becomes a child of the nearest preceding heading with a smaller level.
pub fn nest(flat: Vec<TocEntry>) -> Vec<TocEntry> {
    let mut roots = Vec::new();
    let mut stack: Vec<TocEntry> = Vec::new();

    for entry in flat {
        while stack.last().is_some_and(|top| top.level >= entry.level) {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }
        stack.push(entry);
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    roots
}

fn attach(stack: &mut [TocEntry], roots: &mut Vec<TocEntry>, entry: TocEntry) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(entry),
        None => roots.push(entry),
    }
}

/// The `<li>` items of the TOC, without the enclosing `<ul>`
///
/// Empty when there are no entries.
pub fn render_items(entries: &[TocEntry]) -> String {
    let mut html = String::new();
    if !entries.is_empty() {
        html.push('\n');
        push_items(&mut html, entries);
    }
    html
}

/// The complete TOC block as placed at a `[TOC]` marker
pub fn render_block(entries: &[TocEntry]) -> String {
    format!(
        "<div class=\"toc\">\n<ul>{}</ul>\n</div>\n",
        render_items(entries)
    )
}

fn push_items(html: &mut String, entries: &[TocEntry]) {
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape(&entry.id),
            html_escape(&entry.name)
        ));
        if !entry.children.is_empty() {
            html.push_str("<ul>\n");
            push_items(html, &entry.children);
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}
