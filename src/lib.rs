//! pillar-mode: markup recognition and editing helpers for Pillar documents
//!
//! The `syntax` module recognizes Pillar markup and maps it to styles,
//! `insert` plans markup insertions, and `compile` hands documents to the
//! external Pillar compiler.

pub mod compile;
pub mod config;
pub mod error;
pub mod insert;
pub mod render;
pub mod syntax;

pub use error::{PillarError, Result};
