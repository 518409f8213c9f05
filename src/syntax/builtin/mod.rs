//! Built-in rule tables

mod pillar;

pub use pillar::{pillar_registry, rule_table, HEADER_STYLE, TEXT_STYLE};
