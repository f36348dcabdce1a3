//! Entry content rendering.
//!
//! Entry content is rich markup. The only transformation applied to message
//! text by default is newline to `<br>` substitution.

use serde::{Deserialize, Serialize};

/// Line-break markup inserted for every newline.
pub const LINE_BREAK: &str = "<br>";

/// How message text is turned into entry markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarkupPolicy {
    /// Insert text as-is apart from newline substitution. Markup in the text
    /// is kept and interpreted by the renderer.
    #[default]
    Raw,
    /// Escape markup-significant characters before newline substitution.
    Escaped,
}

impl MarkupPolicy {
    /// Render message text into entry markup.
    pub fn render(self, text: &str) -> String {
        match self {
            Self::Raw => newlines_to_breaks(text),
            Self::Escaped => newlines_to_breaks(&escape(text)),
        }
    }
}

/// Replace every `\n` with `<br>`.
pub fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

/// Escape `& < > " '` as character references.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Undo [`escape`].
pub fn unescape(markup: &str) -> String {
    markup
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Split entry markup into visual lines at each `<br>`.
pub fn markup_lines(markup: &str) -> Vec<&str> {
    markup.split(LINE_BREAK).collect()
}
