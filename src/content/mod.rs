//! Content module - post models and markdown processing

mod highlight;
mod markdown;
mod post;
mod toc;

pub use highlight::Highlighter;
pub use markdown::{ContentRenderer, MarkdownRenderer, RenderProfile, RichContent};
pub use post::{Category, Post, Tag, NAME_MAX_LENGTH, TITLE_MAX_LENGTH};
pub use toc::{AnchorIds, TocEntry};
