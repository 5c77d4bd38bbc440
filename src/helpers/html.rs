//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
///
/// Entities are left as they are; only the markup between `<` and `>` is dropped.
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Keep at most `length` characters of a string
///
/// Counts Unicode scalar values, not bytes, and does not look for word boundaries.
///
/// # Examples
/// ```
/// use blog_rs::helpers::truncate_chars;
///
/// assert_eq!(truncate_chars("Hello World", 7), "Hello W");
/// assert_eq!(truncate_chars("你好世界", 2), "你好");
/// ```
pub fn truncate_chars(s: &str, length: usize) -> String {
    match s.char_indices().nth(length) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
