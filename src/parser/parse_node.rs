//! Parse node type definitions
//!
//! [`AnyParseNode`] is the tagged-union AST produced by function handlers.
//! Its discriminant, [`NodeType`], keys the builder table of the
//! [`MathContext`](crate::MathContext), so adding a variant and registering a
//! builder for it is all a new command family needs.

use strum::{AsRefStr, Display, EnumDiscriminants};

use crate::types::{Mode, ParseError, ParseErrorKind, SourceLocation};

/// The core Abstract Syntax Tree (AST) node type.
///
/// Every variant carries the [`Mode`] it was parsed in and, when the node
/// came from lexed input, its [`SourceLocation`]. Nodes are immutable once a
/// handler has returned them.
///
/// # See Also
///
/// * [`NodeType`] - The discriminant type used for builder dispatch
/// * [`ParseNode`] - Type alias for this enum
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant type for runtime type checking of parse nodes")]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "lowercase"))]
#[strum_discriminants(name(NodeType))]
pub enum AnyParseNode {
    /// ## Structural Nodes
    /// Ordered groups of expressions (`{...}`)
    OrdGroup(ParseNodeOrdGroup),
    /// Fractions (`\frac{a}{b}`)
    Genfrac(Box<ParseNodeGenfrac>),

    /// ## Symbol Nodes
    /// Math-mode letters, rendered as identifiers
    MathOrd(ParseNodeMathOrd),
    /// Digits, punctuation and text-mode characters
    TextOrd(ParseNodeTextOrd),

    /// ## Text and Spacing
    /// Text content within math (`\text{...}`)
    Text(ParseNodeText),
    /// Horizontal phantom content (`\hphantom{...}`)
    Hphantom(ParseNodeHphantom),
    /// Zero-width overlapping content (`\llap`, `\mathrlap`, ...)
    Lap(ParseNodeLap),

    /// ## Arrows
    #[strum_discriminants(strum(serialize = "x-arrow"))]
    /// Extensible arrows with labels (`\xrightarrow[below]{above}`)
    XArrow(ParseNodeXArrow),
    #[strum_discriminants(strum(serialize = "stacked-arrow"))]
    /// Two extensible arrows stacked vertically (`\xtofrom`, `\equilibrium`)
    StackedArrow(Box<ParseNodeStackedArrow>),
}

/// Type alias for [`AnyParseNode`].
pub type ParseNode = AnyParseNode;

impl AnyParseNode {
    /// The discriminant of this node.
    #[must_use]
    pub fn discriminant(&self) -> NodeType {
        NodeType::from(self)
    }

    /// Get the mode of current node
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::OrdGroup(node) => node.mode,
            Self::Genfrac(node) => node.mode,
            Self::MathOrd(node) => node.mode,
            Self::TextOrd(node) => node.mode,
            Self::Text(node) => node.mode,
            Self::Hphantom(node) => node.mode,
            Self::Lap(node) => node.mode,
            Self::XArrow(node) => node.mode,
            Self::StackedArrow(node) => node.mode,
        }
    }

    /// Get the source location of current node, if known
    #[must_use]
    pub const fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::OrdGroup(node) => node.loc.as_ref(),
            Self::Genfrac(node) => node.loc.as_ref(),
            Self::MathOrd(node) => node.loc.as_ref(),
            Self::TextOrd(node) => node.loc.as_ref(),
            Self::Text(node) => node.loc.as_ref(),
            Self::Hphantom(node) => node.loc.as_ref(),
            Self::Lap(node) => node.loc.as_ref(),
            Self::XArrow(node) => node.loc.as_ref(),
            Self::StackedArrow(node) => node.loc.as_ref(),
        }
    }

    /// Get the text field of symbol nodes
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::MathOrd(node) => Some(&node.text),
            Self::TextOrd(node) => Some(&node.text),
            _ => None,
        }
    }

    /// Get the command name of arrow nodes
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::XArrow(node) => Some(&node.label),
            Self::StackedArrow(node) => Some(&node.label),
            _ => None,
        }
    }
}

/// Ensures that `node` has the expected type.
///
/// # Errors
///
/// Returns [`ParseErrorKind::NodeTypeMismatch`] positioned at the node when
/// the discriminant differs.
pub fn assert_node_type(node: &AnyParseNode, expected: NodeType) -> Result<(), ParseError> {
    if node.discriminant() == expected {
        Ok(())
    } else {
        Err(ParseError::with_token(
            ParseErrorKind::mismatch(expected, node),
            node,
        ))
    }
}

/// A braced group of expressions.
///
/// Arguments that consist of a single token are also wrapped in an ordgroup
/// so that every argument has the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOrdGroup {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The expressions contained within the group
    pub body: Vec<AnyParseNode>,
}

/// An ordinary math symbol, usually a letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMathOrd {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The symbol text
    pub text: String,
}

/// An ordinary text symbol: a digit, punctuation, or any character in text
/// mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTextOrd {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The text content
    pub text: String,
}

/// A fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeGenfrac {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The numerator expression
    pub numer: AnyParseNode,
    /// The denominator expression
    pub denom: AnyParseNode,
}

/// Text inside math, parsed in text mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeText {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The text content as parse nodes
    pub body: Vec<AnyParseNode>,
}

/// Horizontal phantom: keeps the width of its body and hides it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHphantom {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The horizontal phantom content
    pub body: Box<AnyParseNode>,
}

/// Which side of the current point a lap overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LapAlignment {
    /// Content extends to the left (`\llap`)
    Llap,
    /// Content extends to the right (`\rlap`)
    Rlap,
    /// Content is centered on the current point (`\clap`)
    Clap,
}

/// Zero-width overlapping content.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeLap {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The alignment for overlapping
    pub alignment: LapAlignment,
    /// The overlapping content
    pub body: Box<AnyParseNode>,
}

/// An extensible arrow with optional labels above and below.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeXArrow {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The command name, e.g. `\xrightarrow`
    pub label: String,
    /// The content above the arrow
    pub body: Option<Box<AnyParseNode>>,
    /// Optional content below the arrow
    pub below: Option<Box<AnyParseNode>>,
}

/// A pair of stacked extensible arrows sharing one pair of labels.
///
/// The upper arrow shows `body` above it and an invisible copy of `below`
/// underneath; the lower arrow shows `below` underneath and an invisible
/// copy of `body` above. The copies keep both arrows the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeStackedArrow {
    /// The parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Optional source location for error reporting
    pub loc: Option<SourceLocation>,
    /// The command name, e.g. `\equilibrium`
    pub label: String,
    /// The content above the pair
    pub body: Option<AnyParseNode>,
    /// Optional content below the pair
    pub below: Option<AnyParseNode>,
    /// Phantom of `below`, set under the upper arrow
    pub upper_arrow_below: Option<AnyParseNode>,
    /// Phantom of `body`, set over the lower arrow
    pub lower_arrow_body: Option<AnyParseNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;

    fn mathord(text: &str) -> AnyParseNode {
        AnyParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: text.to_owned(),
        })
    }

    #[test]
    fn test_discriminant_names() {
        assert_eq!(mathord("x").discriminant(), NodeType::MathOrd);
        assert_eq!(NodeType::XArrow.to_string(), "x-arrow");
        assert_eq!(NodeType::StackedArrow.as_ref(), "stacked-arrow");
        assert_eq!(NodeType::OrdGroup.as_ref(), "ordgroup");
    }

    #[test]
    fn test_location_and_mode() {
        let input: Arc<str> = Arc::from("xy");
        let node = AnyParseNode::TextOrd(ParseNodeTextOrd {
            mode: Mode::Text,
            loc: Some(SourceLocation::new(input, 1, 2)),
            text: "y".to_owned(),
        });
        assert_eq!(node.mode(), Mode::Text);
        assert_eq!(node.location().map(SourceLocation::start), Some(1));
        assert_eq!(node.text(), Some("y"));
        assert_eq!(node.label(), None);
    }

    #[test]
    fn test_assert_node_type() {
        let node = mathord("x");
        assert!(assert_node_type(&node, NodeType::MathOrd).is_ok());

        let err = assert_node_type(&node, NodeType::Lap).unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::NodeTypeMismatch {
                expected: NodeType::Lap,
                actual: NodeType::MathOrd,
            }
        ));
    }

    #[test]
    fn test_lap_alignment_names() {
        assert_eq!(LapAlignment::Llap.as_ref(), "llap");
        assert_eq!(LapAlignment::Clap.to_string(), "clap");
    }
}
