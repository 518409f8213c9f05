//! Markup rule types
//!
//! A `RuleDef` is what a rule table author writes. Registering it in a
//! `RuleRegistry` compiles it into a `MarkupRule`.

use std::ops::Range;

use regex::Regex;

use super::pattern::{self, preprocess};
use super::style::StyleDescriptor;
use crate::error::{PillarError, Result};

/// Symmetric delimiter markup such as `""bold""`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialText {
    /// Literal delimiter written before and after the styled text
    pub delimiter: String,
    /// Shortcut key bound to the insertion action
    pub shortcut_key: String,
}

/// How a rule finds its text
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Authored pattern, optionally styling one capture group
    Pattern {
        template: String,
        capture_group: Option<usize>,
    },
    /// Pattern derived from a symmetric delimiter
    Special(SpecialText),
}

/// An authored rule, not yet compiled
#[derive(Debug, Clone)]
pub struct RuleDef {
    /// Rule name, also the id of its style
    pub name: String,
    pub kind: RuleKind,
    /// Style attributes; the id is replaced by the rule name on registration
    pub style: StyleDescriptor,
}

impl RuleDef {
    /// Rule styling the whole match of `template`
    pub fn pattern(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: RuleKind::Pattern {
                template: template.to_string(),
                capture_group: None,
            },
            style: StyleDescriptor::new(name),
        }
    }

    /// Symmetric delimiter rule with a shortcut key
    pub fn special(name: &str, delimiter: &str, shortcut_key: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: RuleKind::Special(SpecialText {
                delimiter: delimiter.to_string(),
                shortcut_key: shortcut_key.to_string(),
            }),
            style: StyleDescriptor::new(name),
        }
    }

    /// Builder: style only this capture group (pattern rules only)
    pub fn group(mut self, group: usize) -> Self {
        if let RuleKind::Pattern { capture_group, .. } = &mut self.kind {
            *capture_group = Some(group);
        }
        self
    }

    /// Builder: set the style attributes
    pub fn styled(mut self, style: StyleDescriptor) -> Self {
        self.style = style;
        self
    }

    /// Compile into a `MarkupRule`, checking the pattern and capture group
    pub fn compile(&self) -> Result<MarkupRule> {
        let (template, capture_group, special) = match &self.kind {
            RuleKind::Pattern {
                template,
                capture_group,
            } => (template.clone(), *capture_group, None),
            RuleKind::Special(special) => {
                if special.delimiter.is_empty() {
                    return Err(PillarError::InvalidMarkup(special.delimiter.clone()));
                }
                (
                    pattern::symmetric_template(&special.delimiter),
                    Some(1),
                    Some(special.clone()),
                )
            }
        };

        let regex = preprocess(&template)?;
        if let Some(group) = capture_group {
            // captures_len counts the implicit whole-match group
            let available = regex.captures_len() - 1;
            if group > available {
                return Err(PillarError::InvalidCaptureGroup {
                    name: self.name.clone(),
                    group,
                    available,
                });
            }
        }

        Ok(MarkupRule {
            name: self.name.clone(),
            template,
            regex,
            capture_group,
            special,
        })
    }
}

/// A compiled markup rule
#[derive(Debug, Clone)]
pub struct MarkupRule {
    /// Rule name, also the id of its style
    pub name: String,
    /// Authored pattern before placeholder expansion
    pub template: String,
    regex: Regex,
    /// Styled capture group (None = whole match)
    pub capture_group: Option<usize>,
    /// Delimiter and key for symmetric markup
    pub special: Option<SpecialText>,
}

impl MarkupRule {
    /// The compiled pattern
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Id of the style applied to this rule's matches
    pub fn style_id(&self) -> &str {
        &self.name
    }

    /// Styled ranges of the matches whose styled text starts in `window`
    ///
    /// Matching sees the whole text, so anchors, the escape check and
    /// matches running past `window.end` behave as in a full scan. Matches
    /// do not overlap. `window` must lie on character boundaries.
    pub fn find_spans(&self, text: &str, window: Range<usize>) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        // Special text consumes the character before its opening delimiter,
        // so it starts one character early to match right at the window start.
        let mut pos = match self.special {
            Some(_) => text[..window.start]
                .char_indices()
                .next_back()
                .map_or(window.start, |(i, _)| i),
            None => window.start,
        };

        while pos <= text.len() {
            let Some(caps) = self.regex.captures_at(text, pos) else {
                break;
            };
            let whole = caps.get(0).map_or(pos..pos, |m| m.range());
            if whole.start >= window.end {
                break;
            }

            let styled = match self.capture_group {
                Some(group) => caps.get(group).map(|m| m.range()),
                None => Some(whole.clone()),
            }
            .filter(|range| !range.is_empty());

            // A match styling text before the window must not hide one
            // starting at the window start.
            if pos < window.start && styled.as_ref().map_or(true, |r| r.start < window.start) {
                pos = window.start;
                continue;
            }
            if let Some(range) = styled {
                if range.start >= window.start && range.start < window.end {
                    spans.push((range.start, range.end));
                }
            }

            pos = if whole.end > whole.start {
                whole.end
            } else {
                // Empty match: step over one character
                match text[whole.end..].chars().next() {
                    Some(ch) => whole.end + ch.len_utf8(),
                    None => break,
                }
            };
        }

        spans
    }
}
