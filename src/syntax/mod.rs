//! Markup recognition and styling
//!
//! This module holds the highlighting engine:
//! - Rule registry with pattern preprocessing
//! - Style descriptors with inheritance
//! - Scan-region extension for partial re-highlighting
//! - The matching pass producing styled spans

pub mod builtin;

mod highlight;
mod manager;
mod pattern;
mod region;
mod registry;
mod rules;
mod style;

pub use highlight::{highlight, StyledSpan};
pub use manager::{Highlighter, EXTENSIONS};
pub use pattern::{expand, preprocess, symmetric_template, ANYTHING, ESCAPE};
pub use region::{extend, ScanWindow, TextSource};
pub use registry::{InsertionAction, RuleRegistry};
pub use rules::{MarkupRule, RuleDef, RuleKind, SpecialText};
pub use style::{
    AttrValue, Color, Slant, Style, StyleAttribute, StyleDescriptor, StyleSheet, Weight,
};
