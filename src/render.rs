//! Terminal rendering of highlighted documents

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::syntax::{Color, Style, StyleSheet, StyledSpan};

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

/// Which span styles each byte of `text`
///
/// Where spans overlap, the first one in `spans` wins; with registry
/// output that is the earliest registered rule.
pub fn span_owners(len: usize, spans: &[StyledSpan]) -> Vec<Option<usize>> {
    let mut owners = vec![None; len];
    for (idx, span) in spans.iter().enumerate() {
        let end = span.end.min(len);
        for owner in owners.iter_mut().take(end).skip(span.start) {
            if owner.is_none() {
                *owner = Some(idx);
            }
        }
    }
    owners
}

/// Write `text` with its spans styled
pub fn write_styled<W: Write>(
    out: &mut W,
    text: &str,
    spans: &[StyledSpan],
    styles: &StyleSheet,
) -> Result<()> {
    let owners = span_owners(text.len(), spans);
    let mut start = 0;

    while start < text.len() {
        let owner = owners[start];
        let mut end = start + 1;
        while end < text.len() && (owners[end] == owner || !text.is_char_boundary(end)) {
            end += 1;
        }

        let segment = &text[start..end];
        match owner {
            Some(idx) => {
                let style = styles.resolve_id(&spans[idx].style);
                apply_style(out, &style)?;
                queue!(out, Print(segment), SetAttribute(Attribute::Reset))?;
            }
            None => queue!(out, Print(segment))?,
        }
        start = end;
    }

    out.flush()?;
    Ok(())
}

fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.strikethrough {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

/// One line per span: `line:column style text`
///
/// Lines count from 1; columns are display columns counting from 1.
pub fn describe_spans(text: &str, spans: &[StyledSpan]) -> Vec<String> {
    spans
        .iter()
        .map(|span| {
            let before = &text[..span.start];
            let line = before.matches('\n').count() + 1;
            let line_start = before.rfind('\n').map_or(0, |i| i + 1);
            let column = before[line_start..].width() + 1;
            let matched = text[span.start..span.end].replace('\n', "\\n");
            format!("{line}:{column} {} {matched}", span.style)
        })
        .collect()
}
