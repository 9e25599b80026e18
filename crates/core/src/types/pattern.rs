//! Tag search patterns.
//!
//! Tag search is a case-insensitive substring match on `tags_category`. The raw
//! tag comes straight from a URL path, so every regex metacharacter in it is
//! escaped before it is handed to a store: `a.b` matches the literal text
//! `a.b` and never `aXb`.

use regex::{Regex, RegexBuilder};

/// An escaped, case-insensitive "contains" pattern over `tags_category`.
///
/// The only way to build one is [`TagPattern::contains`], so a store never
/// receives unescaped user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPattern {
    raw: String,
    source: String,
}

impl TagPattern {
    /// Pattern matching any tag that contains `raw`, ignoring case.
    #[must_use]
    pub fn contains(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            source: format!(".*{}.*", regex::escape(raw)),
        }
    }

    /// The tag as the caller supplied it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Regular expression source, without case flags.
    ///
    /// Stores must apply it case-insensitively (for example `~*` in
    /// `PostgreSQL`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compile the pattern with case-insensitive matching.
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if the compiled pattern exceeds the regex size
    /// limit, which only happens for pathologically long tags.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.source)
            .case_insensitive(true)
            .build()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn matches(tag: &str, value: &str) -> bool {
        TagPattern::contains(tag).compile().unwrap().is_match(value)
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert!(matches("electronics", "Home Electronics"));
        assert!(matches("HOME", "Home Electronics"));
        assert!(matches("e e", "Home Electronics"));
        assert!(!matches("garden", "Home Electronics"));
    }

    #[test]
    fn test_dot_is_literal() {
        assert!(!matches("a.b", "aXb"));
        assert!(matches("a.b", "xa.by"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        for tag in ["(", "*", "[a-z]+", "^x$", "a|b", "\\d", "{2}", "?"] {
            let pattern = TagPattern::contains(tag);
            let re = pattern.compile().unwrap();
            assert!(re.is_match(&format!("pre{tag}post")), "{tag} should match itself");
        }
        assert!(!matches("[a-z]+", "abc"));
        assert!(!matches("a|b", "a"));
    }

    #[test]
    fn test_empty_tag_matches_anything() {
        assert!(matches("", ""));
        assert!(matches("", "kitchen"));
    }

    #[test]
    fn test_source_is_wrapped() {
        let pattern = TagPattern::contains("a.b");
        assert_eq!(pattern.as_str(), ".*a\\.b.*");
        assert_eq!(pattern.raw(), "a.b");
    }
}
