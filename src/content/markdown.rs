//! Markdown rendering with syntax highlighting and a table of contents

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::highlight::Highlighter;
use super::toc::{self, AnchorIds, TocEntry};
use crate::config::MarkdownConfig;
use crate::helpers::{strip_html, truncate_chars};

/// Which add-ons a render pass uses
///
/// Both profiles enable the extra syntax (tables, fenced code, definition lists,
/// footnotes, heading attributes) and code highlighting. Only `Full` assigns
/// heading anchors and builds a table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderProfile {
    Full,
    Excerpt,
}

impl RenderProfile {
    fn with_toc(self) -> bool {
        matches!(self, RenderProfile::Full)
    }
}

/// Output of a full render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichContent {
    /// Rendered body
    pub content: String,
    /// TOC `<li>` items without the enclosing list; empty without headings
    pub toc: String,
    /// The same TOC as a tree
    pub toc_tokens: Vec<TocEntry>,
}

/// Something that can turn a post body into its derived views
pub trait ContentRenderer {
    /// Body HTML plus table of contents
    fn render_full(&self, markdown: &str) -> RichContent;

    /// Plain text of the body, at most `max_len` characters
    fn render_excerpt(&self, markdown: &str, max_len: usize) -> String;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    highlighter: Highlighter,
    toc_marker: String,
    toc_depth: u8,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    /// Create a renderer from configuration
    pub fn from_config(config: &MarkdownConfig) -> Self {
        Self {
            highlighter: Highlighter::new(&config.highlight),
            toc_marker: config.toc.marker.trim().to_string(),
            toc_depth: config.toc.depth,
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
    }

    /// Render markdown with the given profile
    pub fn render(&self, markdown: &str, profile: RenderProfile) -> RichContent {
        let mut events = self.parse(markdown);

        let mut toc_tokens = Vec::new();
        if profile.with_toc() {
            toc_tokens = toc::nest(self.assign_anchors(&mut events));
            events = self.replace_toc_markers(events, &toc_tokens);
        }

        let mut content = String::new();
        html::push_html(&mut content, events.into_iter());

        tracing::debug!(
            "Rendered {} bytes of markdown with {:?} profile",
            markdown.len(),
            profile
        );

        RichContent {
            content,
            toc: toc::render_items(&toc_tokens),
            toc_tokens,
        }
    }

    /// CSS matching the classed highlight output
    pub fn stylesheet(&self) -> Result<String, syntect::Error> {
        self.highlighter.stylesheet()
    }

    /// Parse into events, with code blocks already highlighted
    fn parse<'a>(&self, markdown: &'a str) -> Vec<Event<'a>> {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlighter.highlight(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(format!("{}\n", highlighted))));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        events
    }

    /// Give every heading an id and collect the ones shallow enough for the TOC
    fn assign_anchors(&self, events: &mut [Event]) -> Vec<TocEntry> {
        let mut ids = AnchorIds::new();
        for event in events.iter() {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                ids.reserve(id);
            }
        }

        let mut flat = Vec::new();
        for i in 0..events.len() {
            let (level, explicit) = match &events[i] {
                Event::Start(Tag::Heading { level, id, .. }) => (*level as u8, id.clone()),
                _ => continue,
            };

            let name = heading_text(&events[i + 1..]);
            let anchor = match explicit {
                Some(id) => id.to_string(),
                None => {
                    let anchor = ids.assign(&name);
                    if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                        *id = Some(CowStr::from(anchor.clone()));
                    }
                    anchor
                }
            };

            if level <= self.toc_depth {
                flat.push(TocEntry::new(level, anchor, name));
            }
        }

        flat
    }

    /// Swap paragraphs holding only the marker text for the TOC block
    fn replace_toc_markers<'a>(
        &self,
        events: Vec<Event<'a>>,
        toc_tokens: &[TocEntry],
    ) -> Vec<Event<'a>> {
        let mut output = Vec::with_capacity(events.len());
        let mut i = 0;

        while i < events.len() {
            if matches!(events[i], Event::Start(Tag::Paragraph)) {
                if let Some(len) = self.marker_paragraph_len(&events[i..]) {
                    output.push(Event::Html(CowStr::from(toc::render_block(toc_tokens))));
                    i += len;
                    continue;
                }
            }
            output.push(events[i].clone());
            i += 1;
        }

        output
    }

    /// Number of events in the paragraph starting the slice, if it is a TOC marker
    fn marker_paragraph_len(&self, events: &[Event]) -> Option<usize> {
        let mut text = String::new();
        for (offset, event) in events.iter().enumerate().skip(1) {
            match event {
                Event::Text(t) => text.push_str(t),
                Event::End(TagEnd::Paragraph) => {
                    return (text.trim() == self.toc_marker).then_some(offset + 1);
                }
                _ => return None,
            }
        }
        None
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render_full(&self, markdown: &str) -> RichContent {
        self.render(markdown, RenderProfile::Full)
    }

    fn render_excerpt(&self, markdown: &str, max_len: usize) -> String {
        let rendered = self.render(markdown, RenderProfile::Excerpt);
        truncate_chars(&strip_html(&rendered.content), max_len)
    }
}

/// Plain text of a heading, read up to its closing tag
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(markdown: &str) -> RichContent {
        MarkdownRenderer::new().render_full(markdown)
    }

    fn excerpt(markdown: &str) -> String {
        MarkdownRenderer::new().render_excerpt(markdown, 54)
    }

    #[test]
    fn test_render_basic_markdown() {
        let rich = full("# Hello World\n\nThis is a test.");
        assert!(rich.content.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(rich.content.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_never_fails_on_odd_input() {
        for input in ["", "   ", "\n\n\t", "<<<>>>", "```", "[^", "| a |\n|", "#", "***_"] {
            let rich = full(input);
            let text = excerpt(input);
            assert!(text.chars().count() <= 54);
            assert!(rich.toc.is_empty() || input.starts_with('#'));
        }
        assert_eq!(full("").content, "");
        assert_eq!(excerpt(""), "");
    }

    #[test]
    fn test_no_headings_no_toc() {
        let rich = full("Just a paragraph.\n\n- a list\n- of items\n");
        assert_eq!(rich.toc, "");
        assert!(rich.toc_tokens.is_empty());
    }

    #[test]
    fn test_toc_nesting() {
        let rich = full("# Hello\n\n## World\n");
        assert_eq!(rich.toc.matches("<li>").count(), 2);
        assert!(rich.toc.contains(r##"<a href="#hello">Hello</a>"##));
        assert!(rich.toc.contains(r##"<a href="#world">World</a>"##));

        let hello = rich.toc.find("#hello").unwrap();
        let inner_list = rich.toc.find("<ul>").unwrap();
        let world = rich.toc.find("#world").unwrap();
        let hello_close = rich.toc.rfind("</li>").unwrap();
        assert!(hello < inner_list && inner_list < world && world < hello_close);
        assert!(!rich.toc.contains(r#"class="toc""#));

        assert_eq!(rich.toc_tokens.len(), 1);
        assert_eq!(rich.toc_tokens[0].id, "hello");
        assert_eq!(rich.toc_tokens[0].children[0].id, "world");
        assert!(rich.content.contains(r#"<h2 id="world">World</h2>"#));
    }

    #[test]
    fn test_duplicate_headings() {
        let rich = full("## Setup\n\n## Setup\n\n## Setup\n");
        let ids: Vec<_> = rich.toc_tokens.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["setup", "setup_1", "setup_2"]);
        assert!(rich.content.contains(r#"<h2 id="setup_2">"#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let rich = full("## The `main` function\n");
        assert_eq!(rich.toc_tokens[0].id, "the-main-function");
        assert_eq!(rich.toc_tokens[0].name, "The main function");
    }

    #[test]
    fn test_explicit_heading_ids_are_kept_and_reserved() {
        let rich = full("# First {#intro}\n\n# Intro\n");
        assert!(rich.content.contains(r#"<h1 id="intro">First</h1>"#));
        assert!(rich.content.contains(r#"<h1 id="intro_1">Intro</h1>"#));
        assert_eq!(rich.toc_tokens[0].id, "intro");
        assert_eq!(rich.toc_tokens[1].id, "intro_1");
    }

    #[test]
    fn test_toc_depth_limits_entries_not_ids() {
        let mut config = MarkdownConfig::default();
        config.toc.depth = 2;
        let renderer = MarkdownRenderer::from_config(&config);
        let rich = renderer.render_full("# A\n\n## B\n\n### C\n");
        assert!(rich.content.contains(r#"<h3 id="c">C</h3>"#));
        assert!(!rich.toc.contains("#c"));
        assert!(rich.toc.contains("#b"));
    }

    #[test]
    fn test_toc_marker_replaced() {
        let rich = full("[TOC]\n\n# One\n\n## Two\n");
        assert!(rich.content.starts_with("<div class=\"toc\">\n<ul>\n<li>"));
        assert!(rich.content.contains(r##"<a href="#two">Two</a>"##));
        assert!(!rich.content.contains("[TOC]"));
    }

    #[test]
    fn test_toc_marker_inside_text_is_left_alone() {
        let rich = full("See [TOC] below.\n\n# One\n");
        assert!(rich.content.contains("See [TOC] below."));
        assert!(!rich.content.contains(r#"class="toc""#));
    }

    #[test]
    fn test_excerpt_length() {
        let text = excerpt(&"a".repeat(1000));
        assert_eq!(text.chars().count(), 54);
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_excerpt_skips_toc() {
        let text = excerpt("# Title\nBody text");
        assert!(text.starts_with("Title"));
        assert!(text.contains("Body text"));
        assert!(!text.contains("href"));
        assert!(!text.contains("toc"));

        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Title\nBody text", RenderProfile::Excerpt);
        assert!(rendered.content.contains("<h1>Title</h1>"));
        assert!(!rendered.content.contains("id="));
        assert!(rendered.toc.is_empty());
    }

    #[test]
    fn test_excerpt_keeps_marker_literal() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render_excerpt("[TOC]\n\n# A\n", 54), "[TOC]\nA\n");
    }

    #[test]
    fn test_excerpt_counts_characters() {
        let text = MarkdownRenderer::new().render_excerpt("中文摘要测试内容", 4);
        assert_eq!(text, "中文摘要");
    }

    #[test]
    fn test_render_code_block() {
        let rich = full("```rust\nfn main() {}\n```");
        assert!(rich.content.contains("codehilite"));
        assert!(rich.content.contains(r#"<code class="language-rust">"#));
        assert!(rich.content.contains("<span class=\"source rust"));
        assert!(!rich.content.contains("<pre><code>"));
    }

    #[test]
    fn test_code_block_ends_its_line() {
        let rich = full("```rust\nx\n```\n\nafter");
        assert!(rich.content.contains("</code></pre></div>\n<p>after</p>"));
    }

    #[test]
    fn test_indented_code_block_highlighted() {
        let rich = full("Text\n\n    let x = 1;\n");
        assert!(rich.content.contains("language-text"));
        assert!(rich.content.contains("let x = 1;"));
    }

    #[test]
    fn test_code_text_survives_excerpt() {
        let text = excerpt("```python\nprint('hi')\n```");
        assert!(text.contains("print("));
        assert!(!text.contains("span"));
    }

    #[test]
    fn test_extra_syntax() {
        let rich = full(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\nNote[^1]\n\n[^1]: A footnote.\n\nTerm\n: Definition\n",
        );
        assert!(rich.content.contains("<table>"));
        assert!(rich.content.contains("footnote-definition"));
        assert!(rich.content.contains("<dl>"));
        assert!(rich.content.contains("<dd>"));
    }

    #[test]
    fn test_unicode_heading_slug() {
        let rich = full("## 第一章\n");
        let id = &rich.toc_tokens[0].id;
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
