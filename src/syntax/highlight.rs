//! Matching and styling pass

use super::region::{ScanWindow, TextSource};
use super::rules::MarkupRule;

/// A styled range of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Id of the style to apply (the rule name)
    pub style: String,
}

impl StyledSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: &str) -> Self {
        Self {
            start,
            end,
            style: style.to_string(),
        }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Match `rules` over `window` and collect the styled spans
///
/// Spans come out grouped by rule in the order given, each group sorted by
/// start offset. Spans of different rules may overlap; picking a winner
/// is left to the caller. Every span starts inside the window but may end
/// past it: matching runs over the whole document, exactly as a full scan
/// would, and only the reported starts are limited to the window. The
/// window is not extended here.
pub fn highlight<T: TextSource + ?Sized>(
    window: ScanWindow,
    document: &T,
    rules: &[MarkupRule],
) -> Vec<StyledSpan> {
    let text = document.text();
    let window = window.clamp_to(text);

    let mut spans = Vec::new();
    for rule in rules {
        spans.extend(
            rule.find_spans(text, window.range())
                .into_iter()
                .map(|(start, end)| StyledSpan::new(start, end, rule.style_id())),
        );
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::RuleDef;

    fn rules() -> Vec<MarkupRule> {
        vec![
            RuleDef::special("bold", "\"\"", "b").compile().unwrap(),
            RuleDef::pattern("script", r"^\[\[\[[[anything]]^\]\]\]")
                .compile()
                .unwrap(),
            RuleDef::pattern("link", r"\*([^*\n]+)\*").group(1).compile().unwrap(),
        ]
    }

    #[test]
    fn test_spans_in_rule_order() {
        let text = "*l1* \"\"b1\"\" *l2* \"\"b2\"\"";
        let spans = highlight(ScanWindow::whole(text), text, &rules());

        let styles: Vec<_> = spans.iter().map(|s| s.style.as_str()).collect();
        assert_eq!(styles, vec!["bold", "bold", "link", "link"]);
        assert!(spans[0].start < spans[1].start);
        assert_eq!(&text[spans[0].start..spans[0].end], "\"\"b1\"\"");
        assert_eq!(&text[spans[2].start..spans[2].end], "l1");
    }

    #[test]
    fn test_multiline_construct() {
        let text = "intro\n\n[[[\nlet x = \"\"a\"\";\n]]]\n\noutro";
        let spans = highlight(ScanWindow::whole(text), text, &rules());

        let script = spans.iter().find(|s| s.style == "script").unwrap();
        assert_eq!(&text[script.start..script.end], "[[[\nlet x = \"\"a\"\";\n]]]");
        // overlapping spans from other rules are kept
        assert!(spans.iter().any(|s| s.style == "bold" && script.contains(s.start)));
    }

    #[test]
    fn test_match_before_window_does_not_hide_one_inside() {
        let text = "*b* *c*";
        let full = highlight(ScanWindow::whole(text), text, &rules());
        assert_eq!(
            full,
            vec![StyledSpan::new(1, 2, "link"), StyledSpan::new(5, 6, "link")]
        );

        // `* *` at 2..5 straddles the window start
        let spans = highlight(ScanWindow::new(3, 7), text, &rules());
        assert_eq!(spans, vec![StyledSpan::new(5, 6, "link")]);
    }

    #[test]
    fn test_window_end_is_not_end_of_input() {
        let line_rule = vec![RuleDef::pattern("horizontal-rule", "^_$")
            .compile()
            .unwrap()];
        let text = "_ is not a rule\nmore";
        assert!(highlight(ScanWindow::new(0, 1), text, &line_rule).is_empty());

        let text = "_\nmore";
        assert_eq!(
            highlight(ScanWindow::new(0, 1), text, &line_rule),
            vec![StyledSpan::new(0, 1, "horizontal-rule")]
        );
    }

    #[test]
    fn test_span_may_end_past_window() {
        let text = "x \"\"long bold\"\" y";
        let spans = highlight(ScanWindow::new(2, 5), text, &rules());
        assert_eq!(spans, vec![StyledSpan::new(2, 15, "bold")]);
    }

    #[test]
    fn test_spans_start_inside_window() {
        let text = "\"\"one\"\" \"\"two\"\" \"\"three\"\"";
        let second = text.find("\"\"two").unwrap();
        let window = ScanWindow::new(second, second + 7);
        let spans = highlight(window, text, &rules());

        assert_eq!(spans, vec![StyledSpan::new(second, second + 7, "bold")]);
    }

    #[test]
    fn test_match_at_window_start_mid_line() {
        let text = "x \"\"b\"\"";
        let spans = highlight(ScanWindow::new(2, text.len()), text, &rules());
        assert_eq!(spans, vec![StyledSpan::new(2, text.len(), "bold")]);
    }

    #[test]
    fn test_empty_window() {
        let text = "\"\"bold\"\"";
        assert!(highlight(ScanWindow::new(3, 3), text, &rules()).is_empty());
        assert!(highlight(ScanWindow::whole(""), "", &rules()).is_empty());
    }

    #[test]
    fn test_span_helpers() {
        let span = StyledSpan::new(5, 10, "bold");
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }
}
