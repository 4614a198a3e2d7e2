//! HTML escaping and trusted markup fragments.

use std::fmt;

/// Escape HTML special characters for safe rendering.
///
/// Covers both text and quoted attribute contexts.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// A fragment of HTML that is safe to inject as inner markup.
///
/// Outside this crate a `Markup` can only come from [`Markup::escaped`] or by
/// joining other `Markup` values, so untrusted strings can never reach the
/// document tree unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Empty fragment.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Escape untrusted text into a fragment.
    pub fn escaped(text: &str) -> Self {
        Self(html_escape(text))
    }

    /// Wrap a fragment that was assembled from escaped pieces.
    pub(crate) fn trusted(html: String) -> Self {
        Self(html)
    }

    /// Join fragments in order.
    pub fn concat<I: IntoIterator<Item = Markup>>(parts: I) -> Self {
        Self(parts.into_iter().map(|m| m.0).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic() {
        assert_eq!(html_escape("hello"), "hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_html_escape_ampersand_first() {
        // Entities already present are escaped again, not passed through.
        assert_eq!(html_escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_markup_concat_preserves_order() {
        let joined = Markup::concat(vec![
            Markup::escaped("<a>"),
            Markup::escaped("b"),
            Markup::escaped("\"c\""),
        ]);
        assert_eq!(joined.as_str(), "&lt;a&gt;b&quot;c&quot;");
    }
}
