//! Code block highlighting with syntect

use lazy_static::lazy_static;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{
    css_for_theme_with_class_style, highlighted_html_for_string, ClassStyle,
    ClassedHTMLGenerator,
};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::{HighlightConfig, HighlightStyle};
use crate::helpers::html_escape;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Turns code blocks into highlighted HTML
pub struct Highlighter {
    style: HighlightStyle,
    theme_name: String,
    css_class: String,
    line_numbers: bool,
}

impl Highlighter {
    /// Create a highlighter from configuration
    pub fn new(config: &HighlightConfig) -> Self {
        let theme_name = if THEME_SET.themes.contains_key(&config.theme) {
            config.theme.clone()
        } else {
            let fallback = THEME_SET
                .themes
                .keys()
                .next()
                .cloned()
                .unwrap_or_default();
            tracing::warn!(
                "Unknown highlight theme {:?}, using {:?}",
                config.theme,
                fallback
            );
            fallback
        };

        Self {
            style: config.style,
            theme_name,
            css_class: config.css_class.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Highlight a code block
    ///
    /// Always yields markup: when syntect fails the code is escaped into a plain block.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.map(str::trim).filter(|l| !l.is_empty()).unwrap_or("text");
        let syntax = find_syntax(lang);

        let highlighted = match self.style {
            HighlightStyle::Classed => classed_html(code, syntax),
            HighlightStyle::Inline => match self.theme() {
                Some(theme) => highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
                    .map(|html| strip_pre_wrapper(&html).to_string()),
                None => Ok(html_escape(code)),
            },
        };

        let body = match highlighted {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to highlight {} code block: {}", lang, e);
                html_escape(code)
            }
        };

        let code_html = format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            body
        );

        if self.line_numbers {
            self.add_line_numbers(code, &code_html)
        } else {
            format!(r#"<div class="{}">{}</div>"#, self.css_class, code_html)
        }
    }

    /// CSS for classed output in the configured theme
    pub fn stylesheet(&self) -> Result<String, syntect::Error> {
        match self.theme() {
            Some(theme) => css_for_theme_with_class_style(theme, ClassStyle::Spaced),
            None => Ok(String::new()),
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEME_SET.themes.get(&self.theme_name)
    }

    /// Put a line number gutter next to highlighted code
    fn add_line_numbers(&self, code: &str, code_html: &str) -> String {
        let line_count = code.lines().count().max(1);

        let gutter = (1..=line_count)
            .map(|i| format!(r#"<span class="line-number">{}</span>"#, i))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<div class="{}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></div>"#,
            self.css_class, gutter, code_html
        )
    }
}

fn find_syntax(lang: &str) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(lang)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn classed_html(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// `highlighted_html_for_string` wraps its output in `<pre style=...>`; keep only the inside
fn strip_pre_wrapper(html: &str) -> &str {
    let inner = match html.find('>') {
        Some(pos) if html.starts_with("<pre") => &html[pos + 1..],
        _ => html,
    };
    inner.trim_end().trim_end_matches("</pre>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classed() -> Highlighter {
        Highlighter::new(&HighlightConfig::default())
    }

    #[test]
    fn test_classed_highlight_has_scope_classes() {
        let html = classed().highlight("fn main() {}\n", Some("rust"));
        assert!(html.starts_with(r#"<div class="codehilite">"#));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains(r#"<span class=""#));
        assert!(!html.contains(r#"class="""#));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let html = classed().highlight("<b>x</b>\n", Some("no-such-language"));
        assert!(html.contains("language-no-such-language"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>x</b>"));
    }

    #[test]
    fn test_missing_language_is_text() {
        let html = classed().highlight("plain\n", None);
        assert!(html.contains("language-text"));
    }

    #[test]
    fn test_inline_style() {
        let config = HighlightConfig {
            style: HighlightStyle::Inline,
            ..HighlightConfig::default()
        };
        let html = Highlighter::new(&config).highlight("let x = 1;\n", Some("rust"));
        assert!(html.contains("style=\"color:"));
        assert!(html.ends_with("</code></pre></div>"));
        assert!(!html.contains("<pre style"));
    }

    #[test]
    fn test_line_numbers() {
        let config = HighlightConfig {
            line_number: true,
            ..HighlightConfig::default()
        };
        let html = Highlighter::new(&config).highlight("a\nb\nc\n", Some("text"));
        assert!(html.contains(r#"<td class="gutter">"#));
        assert!(html.contains(r#"<span class="line-number">3</span>"#));
        assert!(!html.contains(r#"<span class="line-number">4</span>"#));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = HighlightConfig {
            theme: "does-not-exist".to_string(),
            ..HighlightConfig::default()
        };
        let highlighter = Highlighter::new(&config);
        assert!(highlighter.theme().is_some());
    }

    #[test]
    fn test_stylesheet() {
        let css = classed().stylesheet().unwrap();
        assert!(css.contains('{'));
    }
}
