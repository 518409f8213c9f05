//! Error types for pillar-mode

use thiserror::Error;

/// Result type alias for pillar-mode operations
pub type Result<T> = std::result::Result<T, PillarError>;

/// Errors surfaced by rule registration, insertion and the host helpers
#[derive(Error, Debug)]
pub enum PillarError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule `{name}` styles capture group {group} but its pattern only has {available}")]
    InvalidCaptureGroup {
        name: String,
        group: usize,
        available: usize,
    },

    #[error("duplicate rule name: {0}")]
    DuplicateRuleName(String),

    #[error("duplicate style: {0}")]
    DuplicateStyle(String),

    #[error("style `{0}` inherits from itself")]
    CyclicStyleInheritance(String),

    #[error("shortcut key `{key}` of rule `{rule}` is already bound to `{bound_to}`")]
    DuplicateShortcutKey {
        key: String,
        rule: String,
        bound_to: String,
    },

    #[error("invalid markup: {0:?}")]
    InvalidMarkup(String),

    #[error("offset {0} is outside the text or not on a character boundary")]
    InvalidOffset(usize),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output {0} is the input document")]
    OutputIsInput(std::path::PathBuf),

    #[error("configuration error: {0}")]
    Config(String),
}
