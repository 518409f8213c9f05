//! Highlighting entry point for hosts
//!
//! `Highlighter` pairs a shared `RuleRegistry` with the host-side checks:
//! whether a file is Pillar at all, and whether highlighting is switched
//! on. Each request extends the window before matching.

use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::highlight::StyledSpan;
use super::region::{self, ScanWindow, TextSource};
use super::registry::RuleRegistry;

/// File extensions of Pillar documents
pub const EXTENSIONS: &[&str] = &["pillar", "pier"];

/// Main highlighting facade
pub struct Highlighter {
    registry: Arc<RuleRegistry>,
    /// Whether highlighting is enabled
    pub enabled: bool,
}

impl Highlighter {
    /// Create a highlighter over the built-in Pillar rules
    pub fn new() -> Self {
        Self::with_registry(Arc::new(builtin::pillar_registry()))
    }

    /// Create a highlighter over an already populated registry
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            enabled: true,
        }
    }

    /// The rules in use
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Check whether a file is a Pillar document
    pub fn is_pillar_file(filename: &Path) -> bool {
        filename
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .is_some_and(|ext| EXTENSIONS.contains(&ext.as_str()))
    }

    /// Extend `window` and highlight the result
    ///
    /// Returns the window actually scanned with its spans. Empty vec if
    /// highlighting is disabled.
    pub fn highlight<T: TextSource + ?Sized>(
        &self,
        window: ScanWindow,
        document: &T,
    ) -> (ScanWindow, Vec<StyledSpan>) {
        if !self.enabled {
            return (window, Vec::new());
        }

        let extended = region::extend(window, document);
        let spans = self.registry.highlight(extended, document);
        log::debug!(
            "highlighted {:?} (requested {:?}): {} spans",
            extended.range(),
            window.range(),
            spans.len()
        );
        (extended, spans)
    }

    /// Highlight a whole document
    pub fn highlight_all<T: TextSource + ?Sized>(&self, document: &T) -> Vec<StyledSpan> {
        self.highlight(ScanWindow::whole(document), document).1
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
