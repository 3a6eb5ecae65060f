//! Presentation: tree connector glyphs and the color palette.
//!
//! Both are pure presentation concerns — swapping styles never changes
//! traversal order, grouping, or depth accounting.

use colored::{Color, Colorize};

// ============================================================================
// Tree glyphs
// ============================================================================

/// One set of tree connector glyphs.
///
/// `line` continues a pending branch, `fork` introduces a non-final
/// child, `stop` introduces the final child, `open` indents under an
/// already-terminated branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStyle {
    /// Continuation glyph for pending branches.
    pub line: &'static str,
    /// Branch connector for non-final children.
    pub fork: &'static str,
    /// Terminator connector for the final child.
    pub stop: &'static str,
    /// Blank indent under a terminated branch.
    pub open: &'static str,
}

impl TreeStyle {
    /// Unicode box-drawing glyphs (default).
    pub const UNICODE: TreeStyle = TreeStyle {
        line: "│ ",
        fork: "├─",
        stop: "└─",
        open: "  ",
    };

    /// ASCII-safe glyphs for terminals with spotty unicode support.
    pub const ASCII: TreeStyle = TreeStyle {
        line: "| ",
        fork: "|-",
        stop: "+-",
        open: "  ",
    };

    /// Indentation only, no tree drawing.
    pub const BLANK: TreeStyle = TreeStyle {
        line: "  ",
        fork: "  ",
        stop: "  ",
        open: "  ",
    };
}

impl Default for TreeStyle {
    fn default() -> Self {
        TreeStyle::UNICODE
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Display kind tag → color. Unknown tags fall back to white.
pub fn kind_color(tag: &str) -> Color {
    match tag {
        "package" => Color::Green,
        "module" => Color::BrightGreen,
        "type" => Color::Yellow,
        "function" => Color::Cyan,
        "method" => Color::BrightCyan,
        _ => Color::White,
    }
}

/// Positional argument names.
pub const ARG_COLOR: Color = Color::Blue;
/// Keyword argument names.
pub const KWARG_COLOR: Color = Color::BrightBlue;
/// Default values and emphasized receivers.
pub const PLAIN_COLOR: Color = Color::White;
/// Inline warnings: external, back-reference, truncation, bad signature.
pub const WARN_COLOR: Color = Color::Red;

/// Color application with an off switch.
///
/// `--no-color` and tests use a disabled palette, which leaves text
/// untouched rather than toggling the color crate's process-global
/// override.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Palette that emits ANSI styling.
    pub fn colored() -> Self {
        Palette { enabled: true }
    }

    /// Palette that leaves text untouched.
    pub fn plain() -> Self {
        Palette { enabled: false }
    }

    /// Apply a foreground color.
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply a foreground color plus bold.
    pub fn bold(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::colored()
    }
}

// ============================================================================
// Tests
// ============================================================================
