//! Style types and the style resolver
//!
//! A `StyleDescriptor` is a named set of attributes that may delegate
//! unset attributes to a parent descriptor. The `StyleSheet` owns every
//! descriptor, refuses parent cycles when a descriptor is added, and
//! resolves attributes by walking the parent chain.

use std::collections::{BTreeMap, HashMap};

use crate::error::{PillarError, Result};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Fully resolved text style, ready to be drawn on a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub strikethrough: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Bold,
}

/// Font slant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slant {
    Normal,
    Italic,
}

/// Attributes a style descriptor can set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleAttribute {
    Weight,
    Slant,
    Underline,
    StrikeThrough,
    Foreground,
    Background,
    /// Relative height in percent (100 = body text)
    Height,
}

impl StyleAttribute {
    /// Attribute name as used in rule tables and host adapters
    pub fn name(&self) -> &'static str {
        match self {
            StyleAttribute::Weight => "weight",
            StyleAttribute::Slant => "slant",
            StyleAttribute::Underline => "underline",
            StyleAttribute::StrikeThrough => "strike-through",
            StyleAttribute::Foreground => "foreground",
            StyleAttribute::Background => "background",
            StyleAttribute::Height => "height",
        }
    }

    /// Parse an attribute from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "weight" => Some(StyleAttribute::Weight),
            "slant" => Some(StyleAttribute::Slant),
            "underline" => Some(StyleAttribute::Underline),
            "strike-through" => Some(StyleAttribute::StrikeThrough),
            "foreground" => Some(StyleAttribute::Foreground),
            "background" => Some(StyleAttribute::Background),
            "height" => Some(StyleAttribute::Height),
            _ => None,
        }
    }
}

/// Value of a single style attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue {
    Weight(Weight),
    Slant(Slant),
    Flag(bool),
    Color(Color),
    Height(u16),
}

/// A named set of style attributes with optional inheritance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    /// Unique identifier (rule styles use the rule name)
    pub id: String,
    /// Attributes set directly on this style
    pub attributes: BTreeMap<StyleAttribute, AttrValue>,
    /// Style consulted for attributes not set here
    pub parent: Option<String>,
}

impl StyleDescriptor {
    /// Create an empty style
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            attributes: BTreeMap::new(),
            parent: None,
        }
    }

    /// Builder: set an arbitrary attribute
    pub fn with(mut self, attribute: StyleAttribute, value: AttrValue) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    /// Builder: bold weight
    pub fn bold(self) -> Self {
        self.with(StyleAttribute::Weight, AttrValue::Weight(Weight::Bold))
    }

    /// Builder: italic slant
    pub fn italic(self) -> Self {
        self.with(StyleAttribute::Slant, AttrValue::Slant(Slant::Italic))
    }

    /// Builder: underline
    pub fn underline(self) -> Self {
        self.with(StyleAttribute::Underline, AttrValue::Flag(true))
    }

    /// Builder: strike-through
    pub fn strike_through(self) -> Self {
        self.with(StyleAttribute::StrikeThrough, AttrValue::Flag(true))
    }

    /// Builder: foreground color
    pub fn foreground(self, color: Color) -> Self {
        self.with(StyleAttribute::Foreground, AttrValue::Color(color))
    }

    /// Builder: background color
    pub fn background(self, color: Color) -> Self {
        self.with(StyleAttribute::Background, AttrValue::Color(color))
    }

    /// Builder: relative height in percent
    pub fn height(self, percent: u16) -> Self {
        self.with(StyleAttribute::Height, AttrValue::Height(percent))
    }

    /// Builder: inherit unset attributes from `parent`
    pub fn inherits(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Same attributes under a different id
    pub(crate) fn renamed(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }
}

/// All registered style descriptors
///
/// The parent graph is kept acyclic: `add` refuses any descriptor whose
/// parent chain leads back to itself, so resolution always terminates.
/// A parent that is not registered simply ends the chain.
#[derive(Debug, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleDescriptor>,
}

impl StyleSheet {
    /// Create an empty style sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a descriptor without adding it
    pub fn check(&self, style: &StyleDescriptor) -> Result<()> {
        if self.styles.contains_key(&style.id) {
            return Err(PillarError::DuplicateStyle(style.id.clone()));
        }

        let mut parent = style.parent.as_deref();
        while let Some(id) = parent {
            if id == style.id {
                return Err(PillarError::CyclicStyleInheritance(style.id.clone()));
            }
            parent = self.styles.get(id).and_then(|s| s.parent.as_deref());
        }

        Ok(())
    }

    /// Add a descriptor, rejecting duplicates and parent cycles
    pub fn add(&mut self, style: StyleDescriptor) -> Result<()> {
        self.check(&style)?;
        self.styles.insert(style.id.clone(), style);
        Ok(())
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: &str) -> Option<&StyleDescriptor> {
        self.styles.get(id)
    }

    /// Check whether a descriptor exists
    pub fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    /// Resolve an attribute, following the parent chain
    pub fn resolve_attribute(
        &self,
        style: &StyleDescriptor,
        attribute: StyleAttribute,
    ) -> Option<AttrValue> {
        let mut current = Some(style);
        while let Some(style) = current {
            if let Some(value) = style.attributes.get(&attribute) {
                return Some(*value);
            }
            current = style.parent.as_deref().and_then(|id| self.styles.get(id));
        }
        None
    }

    /// Resolve an attribute given the style id and attribute name
    pub fn resolve_named(&self, id: &str, attribute: &str) -> Option<AttrValue> {
        let style = self.styles.get(id)?;
        let attribute = StyleAttribute::from_name(attribute)?;
        self.resolve_attribute(style, attribute)
    }

    /// Resolve every terminal-relevant attribute into a `Style`
    pub fn resolve(&self, style: &StyleDescriptor) -> Style {
        let flag = |attribute| {
            matches!(
                self.resolve_attribute(style, attribute),
                Some(AttrValue::Flag(true))
            )
        };
        let color = |attribute| match self.resolve_attribute(style, attribute) {
            Some(AttrValue::Color(color)) => color,
            _ => Color::Default,
        };

        Style {
            fg: color(StyleAttribute::Foreground),
            bg: color(StyleAttribute::Background),
            bold: matches!(
                self.resolve_attribute(style, StyleAttribute::Weight),
                Some(AttrValue::Weight(Weight::Bold))
            ),
            italic: matches!(
                self.resolve_attribute(style, StyleAttribute::Slant),
                Some(AttrValue::Slant(Slant::Italic))
            ),
            underline: flag(StyleAttribute::Underline),
            strikethrough: flag(StyleAttribute::StrikeThrough),
        }
    }

    /// Resolve a style by id; unknown ids resolve to the default style
    pub fn resolve_id(&self, id: &str) -> Style {
        self.styles
            .get(id)
            .map(|style| self.resolve(style))
            .unwrap_or_default()
    }
}
