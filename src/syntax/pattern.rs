//! Pattern preprocessing
//!
//! Rule patterns are authored with a `[[anything]]` placeholder that
//! stands for any text, including line breaks, matched lazily. Patterns
//! are compiled in multi-line mode so `^` and `$` anchor at line edges.

use regex::{Regex, RegexBuilder};

use crate::error::{PillarError, Result};

/// Placeholder token for "any text, lazily, across lines"
pub const ANYTHING: &str = "[[anything]]";

/// What the placeholder expands to
const ANYTHING_EXPANSION: &str = "(?s:.*?)";

/// Escape character of the markup language
pub const ESCAPE: char = '\\';

/// Expand every placeholder occurrence, leaving the rest untouched
pub fn expand(template: &str) -> String {
    template.replace(ANYTHING, ANYTHING_EXPANSION)
}

/// Expand the placeholder and compile the result
pub fn preprocess(template: &str) -> Result<Regex> {
    let expanded = expand(template);
    RegexBuilder::new(&expanded)
        .multi_line(true)
        .build()
        .map_err(|source| PillarError::InvalidPattern {
            pattern: expanded,
            source,
        })
}

/// Build the template for symmetric delimiter markup
///
/// The opening delimiter must not follow an escape, the enclosed text is
/// non-empty and its last character is not an escape. Group 1 covers the
/// markup including both delimiters.
pub fn symmetric_template(delimiter: &str) -> String {
    let delimiter = regex::escape(delimiter);
    let escape = regex::escape(&ESCAPE.to_string());
    format!("(?:^|[^{escape}])({delimiter}{ANYTHING}[^{escape}]{delimiter})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_leaves_other_text() {
        assert_eq!(expand(r"^\[\[\[x"), r"^\[\[\[x");
        assert_eq!(expand("a[[anything]]b[[anything]]c"), "a(?s:.*?)b(?s:.*?)c");
    }

    #[test]
    fn test_anything_spans_lines() {
        let re = preprocess("A[[anything]]B").unwrap();
        assert!(re.is_match("A\nB"));
        assert!(re.is_match("AxyzB"));
        assert!(re.is_match("AB"));
        assert!(re.is_match("A\n\nsome\ntext\nB"));
        assert!(!re.is_match("A only"));
    }

    #[test]
    fn test_anything_is_lazy() {
        let re = preprocess("<[[anything]]>").unwrap();
        let m = re.find("<a> and <b>").unwrap();
        assert_eq!(m.as_str(), "<a>");
    }

    #[test]
    fn test_multi_line_anchors() {
        let re = preprocess("^!.*$").unwrap();
        let found: Vec<_> = re.find_iter("!one\ntext\n!two").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["!one", "!two"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = preprocess("(unclosed[[anything]]").unwrap_err();
        match err {
            PillarError::InvalidPattern { pattern, .. } => {
                assert_eq!(pattern, "(unclosed(?s:.*?)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_symmetric_shortest_match() {
        let re = preprocess(&symmetric_template("**")).unwrap();
        let caps = re.captures("**a**b**").unwrap();
        assert_eq!(&caps[1], "**a**");
    }

    #[test]
    fn test_symmetric_respects_escapes() {
        let re = preprocess(&symmetric_template("\"\"")).unwrap();
        // escaped opening delimiter
        assert!(!re.is_match("\\\"\"a\"\""));
        // escaped closing delimiter
        assert!(!re.is_match("\"\"a\\\"\""));
        // nothing enclosed
        assert!(!re.is_match("\"\"\"\""));

        let caps = re.captures("x \"\"bold\"\" y").unwrap();
        assert_eq!(&caps[1], "\"\"bold\"\"");
    }

    #[test]
    fn test_symmetric_spans_lines() {
        let re = preprocess(&symmetric_template("''")).unwrap();
        let caps = re.captures("''first\nsecond'' tail").unwrap();
        assert_eq!(&caps[1], "''first\nsecond''");
    }
}
