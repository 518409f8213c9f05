//! Rule registry
//!
//! The registry is filled once, at startup, and read-only afterwards.
//! Hosts share it behind `&` or `Arc`; nothing in here mutates on read.

use super::highlight::{self, StyledSpan};
use super::region::{ScanWindow, TextSource};
use super::rules::{MarkupRule, RuleDef};
use super::style::{StyleDescriptor, StyleSheet};
use crate::error::{PillarError, Result};

/// Insertion action derived from a special-text rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionAction {
    /// Name of the rule the action belongs to
    pub rule: String,
    /// Markup inserted around the selection or caret
    pub markup: String,
    /// Shortcut key bound to the action
    pub key: String,
}

/// Ordered set of markup rules with their styles
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<MarkupRule>,
    styles: StyleSheet,
    actions: Vec<InsertionAction>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a standalone style that rules can inherit from
    pub fn add_style(&mut self, style: StyleDescriptor) -> Result<()> {
        self.styles.add(style)
    }

    /// Register a rule
    ///
    /// Nothing is recorded unless every check passes: the name is unused,
    /// the pattern compiles, a special-text shortcut key is not bound yet,
    /// and the rule's style (id = rule name) has no parent cycle.
    pub fn register(&mut self, def: RuleDef) -> Result<()> {
        if self.rule(&def.name).is_some() {
            return Err(PillarError::DuplicateRuleName(def.name));
        }

        let rule = def.compile()?;
        if let Some(special) = &rule.special {
            if let Some(bound) = self.action_for_key(&special.shortcut_key) {
                return Err(PillarError::DuplicateShortcutKey {
                    key: special.shortcut_key.clone(),
                    rule: rule.name.clone(),
                    bound_to: bound.rule.clone(),
                });
            }
        }
        let style = def.style.renamed(&def.name);
        self.styles.check(&style)?;

        log::debug!(
            "registered rule {} as /{}/",
            rule.name,
            rule.regex().as_str()
        );

        if let Some(special) = &rule.special {
            self.actions.push(InsertionAction {
                rule: rule.name.clone(),
                markup: special.delimiter.clone(),
                key: special.shortcut_key.clone(),
            });
        }
        self.styles.add(style)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in registration order
    pub fn all_rules(&self) -> &[MarkupRule] {
        &self.rules
    }

    /// Look up a rule by name
    pub fn rule(&self, name: &str) -> Option<&MarkupRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Registered styles
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Insertion actions in registration order
    pub fn insertion_actions(&self) -> &[InsertionAction] {
        &self.actions
    }

    /// Insertion action bound to a shortcut key
    pub fn action_for_key(&self, key: &str) -> Option<&InsertionAction> {
        self.actions.iter().find(|a| a.key == key)
    }

    /// Match every rule over a window of the document
    pub fn highlight<T: TextSource + ?Sized>(
        &self,
        window: ScanWindow,
        document: &T,
    ) -> Vec<StyledSpan> {
        highlight::highlight(window, document, &self.rules)
    }
}
