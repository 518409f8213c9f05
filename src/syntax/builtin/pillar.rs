//! Pillar rule table

use crate::syntax::registry::RuleRegistry;
use crate::syntax::rules::RuleDef;
use crate::syntax::style::{Color, StyleDescriptor};

/// Root style every Pillar style descends from
pub const TEXT_STYLE: &str = "pillar-text";

/// Common parent of the header levels
pub const HEADER_STYLE: &str = "pillar-header";

/// Symmetric delimiter markup: (rule name, delimiter, shortcut key)
const SPECIAL_TEXT: &[(&str, &str, &str)] = &[
    ("bold", "\"\"", "b"),
    ("italic", "''", "i"),
    ("monospace", "==", "m"),
    ("strikethrough", "--", "s"),
    ("subscript", "@@", "d"),
    ("superscript", "^^", "p"),
    ("underline", "__", "u"),
];

/// Header heights in percent, level 1 first
const HEADER_HEIGHTS: [u16; 6] = [180, 160, 140, 120, 110, 100];

/// Styles that rules inherit from
fn base_styles() -> Vec<StyleDescriptor> {
    vec![
        StyleDescriptor::new(TEXT_STYLE),
        StyleDescriptor::new(HEADER_STYLE)
            .bold()
            .foreground(Color::Blue)
            .inherits(TEXT_STYLE),
    ]
}

fn special_style(name: &str) -> StyleDescriptor {
    let style = StyleDescriptor::new(name).inherits(TEXT_STYLE);
    match name {
        "bold" => style.bold(),
        "italic" => style.italic(),
        "monospace" => style.foreground(Color::Cyan),
        "strikethrough" => style.strike_through(),
        "subscript" | "superscript" => style.foreground(Color::Yellow).height(80),
        "underline" => style.underline(),
        _ => style,
    }
}

/// Every Pillar rule, in registration order
pub fn rule_table() -> Vec<RuleDef> {
    let mut rules = Vec::new();

    for (level, height) in HEADER_HEIGHTS.iter().enumerate() {
        let level = level + 1;
        let name = format!("header-{level}");
        rules.push(
            RuleDef::pattern(&name, &format!(r"^!{{{level}}}[^!\n].*$")).styled(
                StyleDescriptor::new(&name)
                    .height(*height)
                    .inherits(HEADER_STYLE),
            ),
        );
    }

    for (name, delimiter, key) in SPECIAL_TEXT {
        rules.push(RuleDef::special(name, delimiter, key).styled(special_style(name)));
    }

    let text = |name: &str| StyleDescriptor::new(name).inherits(TEXT_STYLE);
    rules.extend([
        // Line constructs
        RuleDef::pattern("comment", r"^%.*$")
            .styled(text("comment").foreground(Color::BrightBlack).italic()),
        RuleDef::pattern("preformatted", r"^= .*$")
            .styled(text("preformatted").foreground(Color::Cyan)),
        RuleDef::pattern("horizontal-rule", r"^_$")
            .styled(text("horizontal-rule").foreground(Color::BrightBlack)),
        RuleDef::pattern("list", r"^([-#]+) ")
            .group(1)
            .styled(text("list").foreground(Color::Yellow).bold()),
        RuleDef::pattern("definition", r"^([;:]) ")
            .group(1)
            .styled(text("definition").foreground(Color::Yellow).bold()),
        RuleDef::pattern("table", r"^\|.*$")
            .styled(text("table").foreground(Color::BrightBlue)),
        RuleDef::pattern("anchor", r"^@[A-Za-z][\w-]*[ \t]*$")
            .styled(text("anchor").foreground(Color::BrightRed)),
        RuleDef::pattern("annotated-paragraph", r"^(@@[A-Za-z]+)\b")
            .group(1)
            .styled(text("annotated-paragraph").foreground(Color::BrightYellow).bold()),
        // Inline constructs
        RuleDef::pattern("link", r"\*[^*\n]+\*")
            .styled(text("link").foreground(Color::Blue).underline()),
        RuleDef::pattern("figure", r"\+[^+\n]*>[^+\n]+\+")
            .styled(text("figure").foreground(Color::Magenta)),
        RuleDef::pattern("annotation", r"\$\{[^\n]*?\}\$")
            .styled(text("annotation").foreground(Color::BrightMagenta)),
        // Blocks that may span lines
        RuleDef::pattern("script", r"^\[\[\[[[anything]]^\]\]\]")
            .styled(text("script").foreground(Color::Green)),
        RuleDef::pattern("raw", r"\{\{\{[[anything]]\}\}\}")
            .styled(text("raw").foreground(Color::Magenta)),
    ]);

    rules
}

/// Build the registry of Pillar rules
///
/// A rule that fails to register is logged and skipped.
pub fn pillar_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    for style in base_styles() {
        let id = style.id.clone();
        if let Err(e) = registry.add_style(style) {
            log::warn!("skipping style {id}: {e}");
        }
    }

    for def in rule_table() {
        let name = def.name.clone();
        if let Err(e) = registry.register(def) {
            log::warn!("skipping rule {name}: {e}");
        }
    }

    registry
}
