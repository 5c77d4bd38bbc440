//! Configuration module

mod blog;

pub use blog::BlogConfig;
pub use blog::HighlightConfig;
pub use blog::HighlightStyle;
pub use blog::MarkdownConfig;
pub use blog::TocConfig;
pub use blog::{DEFAULT_EXCERPT_LENGTH, EXCERPT_MAX_LENGTH};
