//! Stretchy glyphs for extensible arrows
//!
//! MathML renderers stretch an `<mo stretchy="true">` operator to the width
//! of its `<munderover>` labels, so each arrow command only needs the code
//! point of its glyph.

use phf::phf_map;

use crate::mathml_tree::{MathNode, MathNodeType};

/// Code point mapping for stretchy symbols, keyed by command name without
/// its leading backslash(es)
pub const STRETCHY_CODE_POINT: phf::Map<&'static str, &'static str> = phf_map! {
    "xleftarrow" => "\u{2190}",
    "xrightarrow" => "\u{2192}",
    "xleftrightarrow" => "\u{2194}",
    "xRightarrow" => "\u{21d2}",
    "xleftharpoonup" => "\u{21bc}",
    "xrightharpoonup" => "\u{21c0}",
    "xLeftarrow" => "\u{21d0}",
    "xLeftrightarrow" => "\u{21d4}",
    "xhookleftarrow" => "\u{21a9}",
    "xhookrightarrow" => "\u{21aa}",
    "xmapsto" => "\u{21a6}",
    "xrightharpoondown" => "\u{21c1}",
    "xleftharpoondown" => "\u{21bd}",
    "xtwoheadleftarrow" => "\u{219e}",
    "xtwoheadrightarrow" => "\u{21a0}",
    "xlongequal" => "=",
    // chemistry arrows
    "yields" => "\u{2192}",
    "yieldsLeft" => "\u{2190}",
    "mesomerism" => "\u{2194}",
    "longrightharpoonup" => "\u{21c0}",
    "eqrightharpoonup" => "\u{21c0}",
    "longleftharpoondown" => "\u{21bd}",
    "eqleftharpoondown" => "\u{21bd}",
    // commutative diagrams
    "cdrightarrow" => "\u{2192}",
    "cdleftarrow" => "\u{2190}",
    "cdlongequal" => "=",
};

/// Code point of the stretchy glyph for `name`, if it has one.
#[must_use]
pub fn code_point(name: &str) -> Option<&'static str> {
    STRETCHY_CODE_POINT
        .get(name.trim_start_matches('\\'))
        .copied()
}

/// Create a MathML node for stretchy elements.
///
/// Unknown names produce a stretchy space so the surrounding layout keeps
/// its shape.
#[must_use]
pub fn math_ml_node(name: &str) -> MathNode {
    MathNode::with_text(MathNodeType::Mo, code_point(name).unwrap_or(" ")).attr("stretchy", "true")
}
