// ABOUTME: Output escaping applied to escaping mustaches
// ABOUTME: HTML escaping is the default; escaping can be switched off through configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapePolicy {
    #[default]
    Html,
    None,
}

impl EscapePolicy {
    pub fn apply(self, text: String) -> String {
        match self {
            EscapePolicy::Html => escape_html(&text),
            EscapePolicy::None => text,
        }
    }
}

/// Escape the characters significant in HTML text and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Nobody's here"), "Nobody&apos;s here");
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_policy_none_passes_through() {
        assert_eq!(EscapePolicy::None.apply("<b>".to_string()), "<b>");
        assert_eq!(EscapePolicy::default().apply("<b>".to_string()), "&lt;b&gt;");
    }
}
