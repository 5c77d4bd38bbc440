//! Blog configuration (blog.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Default number of characters kept when an excerpt is generated on save
pub const DEFAULT_EXCERPT_LENGTH: usize = 54;

/// Largest excerpt the post schema accepts
pub const EXCERPT_MAX_LENGTH: usize = 200;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub title: String,

    /// Directory holding the post store, relative to the base directory
    pub data_dir: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            data_dir: "data".to_string(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Check the values serde cannot express as types
    pub fn validate(&self) -> Result<()> {
        let length = self.markdown.excerpt_length;
        if length == 0 || length > EXCERPT_MAX_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "markdown.excerpt_length must be between 1 and {}, got {}",
                EXCERPT_MAX_LENGTH, length
            )));
        }

        let depth = self.markdown.toc.depth;
        if !(1..=6).contains(&depth) {
            return Err(Error::InvalidConfig(format!(
                "markdown.toc.depth must be between 1 and 6, got {}",
                depth
            )));
        }

        if self.markdown.toc.marker.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "markdown.toc.marker must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub excerpt_length: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub toc: TocConfig,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            highlight: HighlightConfig::default(),
            toc: TocConfig::default(),
        }
    }
}

/// How highlighted code carries its colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    /// Scope names as CSS classes, colored by an external stylesheet
    Classed,
    /// Theme colors written into `style` attributes
    Inline,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub style: HighlightStyle,
    pub theme: String,
    pub css_class: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            style: HighlightStyle::Classed,
            theme: "base16-ocean.dark".to_string(),
            css_class: "codehilite".to_string(),
            line_number: false,
        }
    }
}

/// Table of contents configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Paragraph text replaced by the rendered TOC
    pub marker: String,
    /// Deepest heading level listed in the TOC
    pub depth: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            marker: "[TOC]".to_string(),
            depth: 6,
        }
    }
}
