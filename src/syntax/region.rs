//! Scan windows and region extension
//!
//! Hosts re-highlight small windows of a document, usually the lines
//! around an edit. Constructs matched through `[[anything]]` can span
//! several lines, so a window cut in the middle of one would truncate or
//! miss it. `extend` grows the window to the surrounding blank lines.
//!
//! This assumes blocks are always separated from surrounding text by at
//! least one blank line. Pillar's grammar keeps to that, but nothing here
//! checks it: two constructs written on adjacent lines can still be cut
//! by a window edge. Blank lines are recognised with either LF or CRLF
//! line endings.

use std::ops::Range;

/// A blank line: two consecutive line separators, LF or CRLF
const BLANK_LINES: [&[u8]; 2] = [b"\n\n", b"\r\n\r\n"];

/// Read-only access to the text of a document
///
/// Offsets are byte offsets into `text()`.
pub trait TextSource {
    /// The whole document
    fn text(&self) -> &str;

    /// Document length in bytes
    fn len(&self) -> usize {
        self.text().len()
    }

    /// Check if the document is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextSource for str {
    fn text(&self) -> &str {
        self
    }
}

impl TextSource for String {
    fn text(&self) -> &str {
        self
    }
}

/// Byte range of a document to (re-)highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: usize,
    pub end: usize,
}

impl ScanWindow {
    /// Create a window; the offsets are put in order
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Window covering a whole document
    pub fn whole<T: TextSource + ?Sized>(document: &T) -> Self {
        Self::new(0, document.len())
    }

    /// Window as a range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp to `text`, rounding outward to character boundaries
    pub fn clamp_to(&self, text: &str) -> Self {
        let mut start = self.start.min(text.len());
        let mut end = self.end.min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        while !text.is_char_boundary(end) {
            end += 1;
        }
        Self { start, end }
    }
}

/// Grow a window to the nearest blank lines around it
///
/// The start moves back to just after the nearest blank line at or before
/// it; the end moves forward to the start of the line following the
/// nearest blank line at or after it. An edge with no blank line in its
/// direction stays where it is. The result always contains the input
/// (after clamping to the document), and extending it again changes
/// nothing.
pub fn extend<T: TextSource + ?Sized>(window: ScanWindow, document: &T) -> ScanWindow {
    let text = document.text();
    let window = window.clamp_to(text);
    let bytes = text.as_bytes();

    let start = boundary_before(bytes, window.start).unwrap_or(window.start);
    let end = boundary_after(bytes, window.end).unwrap_or(window.end);

    ScanWindow { start, end }
}

/// Whether `pos` directly follows a blank line
fn is_boundary(bytes: &[u8], pos: usize) -> bool {
    BLANK_LINES
        .iter()
        .any(|blank| bytes[..pos].ends_with(blank))
}

/// Last boundary at or before `pos`
fn boundary_before(bytes: &[u8], pos: usize) -> Option<usize> {
    (0..=pos).rev().find(|&p| is_boundary(bytes, p))
}

/// First boundary at or after `pos`
fn boundary_after(bytes: &[u8], pos: usize) -> Option<usize> {
    (pos..=bytes.len()).find(|&p| is_boundary(bytes, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "!Title\n\nfirst para\nstill first\n\n[[[\ncode\n]]]\n\nlast";

    fn offset(needle: &str) -> usize {
        DOC.find(needle).unwrap()
    }

    #[test]
    fn test_extend_to_paragraphs() {
        let code = offset("code");
        let window = extend(ScanWindow::new(code, code + 2), DOC);

        assert_eq!(window.start, offset("[[["));
        assert_eq!(window.end, offset("last"));
        assert_eq!(&DOC[window.range()], "[[[\ncode\n]]]\n\n");
    }

    #[test]
    fn test_no_boundary_leaves_edges() {
        let doc = "one line\nanother line";
        let window = extend(ScanWindow::new(3, 12), doc);
        assert_eq!(window, ScanWindow::new(3, 12));
    }

    #[test]
    fn test_boundary_only_on_one_side() {
        let first = offset("first");
        let window = extend(ScanWindow::new(1, first + 3), DOC);
        assert_eq!(window.start, 1);
        assert_eq!(window.end, offset("[[["));
    }

    #[test]
    fn test_extend_is_idempotent() {
        let docs = [
            DOC,
            "",
            "\n\n\n\n",
            "a\n\n\nb\n\n",
            "no blank lines at all",
            "a\r\n\r\nb\r\n\r\n\r\nc",
        ];
        for doc in docs {
            for start in 0..=doc.len() {
                for end in start..=doc.len() {
                    let once = extend(ScanWindow::new(start, end), doc);
                    let twice = extend(once, doc);
                    assert_eq!(once, twice, "doc {doc:?} window {start}..{end}");
                }
            }
        }
    }

    #[test]
    fn test_extend_is_superset() {
        for start in 0..=DOC.len() {
            for end in start..=DOC.len() {
                let window = extend(ScanWindow::new(start, end), DOC);
                assert!(window.start <= start);
                assert!(window.end >= end);
            }
        }
    }

    #[test]
    fn test_crlf_blank_lines() {
        let doc = "a\r\n\r\nb\r\n\r\nc";
        let b = doc.find('b').unwrap();
        let window = extend(ScanWindow::new(b, b + 1), doc);
        assert_eq!(&doc[window.range()], "b\r\n\r\n");

        // a lone CR between LFs is not a blank line
        let doc = "a\n\rb";
        assert_eq!(extend(ScanWindow::new(3, 3), doc), ScanWindow::new(3, 3));
    }

    #[test]
    fn test_window_inside_blank_line_run() {
        let doc = "a\n\n\nb";
        // offset 2 sits between the two newlines of the first blank line
        let window = extend(ScanWindow::new(2, 2), doc);
        assert_eq!(window, ScanWindow::new(2, 3));
        // offset 3 directly follows a blank line, so it is its own boundary
        assert_eq!(extend(ScanWindow::new(3, 3), doc), ScanWindow::new(3, 3));
    }

    #[test]
    fn test_window_clamped_to_document() {
        let window = extend(ScanWindow::new(4, 100), "ab\n\ncd");
        assert_eq!(window, ScanWindow::new(4, 6));
    }

    #[test]
    fn test_clamp_rounds_outward() {
        let text = "aéb";
        assert_eq!(ScanWindow::new(2, 2).clamp_to(text), ScanWindow { start: 1, end: 3 });
    }

    #[test]
    fn test_window_ordered() {
        assert_eq!(ScanWindow::new(9, 4), ScanWindow { start: 4, end: 9 });
        assert_eq!(ScanWindow::new(4, 9).len(), 5);
    }
}
