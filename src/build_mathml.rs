//! Walks a parse tree and builds the MathML output tree.
//!
//! Each node is dispatched by its [`NodeType`](crate::parser::parse_node::NodeType)
//! to the builder registered in the [`MathContext`]. The walk threads an
//! immutable [`Style`]; builders that need a different script level derive a
//! new one for their children.

use crate::MathContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, TextNode};
use crate::parser::parse_node::AnyParseNode;
use crate::style::{self, Style};
use crate::types::{ParseError, ParseErrorKind, Settings};

const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Wrap a list of nodes in an `<mrow>`, unless there is exactly one.
#[must_use]
pub fn make_row(mut body: Vec<MathDomNode>) -> MathDomNode {
    if body.len() == 1 {
        body.remove(0)
    } else {
        MathNode::with_children(MathNodeType::Mrow, body).into()
    }
}

/// Build every node of `expression` in order.
pub fn build_expression(
    ctx: &MathContext,
    expression: &[AnyParseNode],
    style: &Style,
) -> Result<Vec<MathDomNode>, ParseError> {
    expression
        .iter()
        .map(|group| build_group(ctx, group, style))
        .collect()
}

/// Build `expression` and wrap the result with [`make_row`].
pub fn build_expression_row(
    ctx: &MathContext,
    expression: &[AnyParseNode],
    style: &Style,
) -> Result<MathDomNode, ParseError> {
    Ok(make_row(build_expression(ctx, expression, style)?))
}

/// Builds a MathML node from a single parse node using the builder
/// registered for its node type.
///
/// # Errors
///
/// [`ParseErrorKind::UnknownGroupType`] if no builder is registered for the
/// node's type; otherwise whatever the builder returns.
pub fn build_group(
    ctx: &MathContext,
    group: &AnyParseNode,
    style: &Style,
) -> Result<MathDomNode, ParseError> {
    let group_type = group.discriminant();
    ctx.mathml_group_builders.get(&group_type).map_or_else(
        || {
            Err(ParseError::with_token(
                ParseErrorKind::UnknownGroupType { group_type },
                group,
            ))
        },
        |builder| builder(group, style, ctx),
    )
}

/// Build the whole document: the `<math>` element around the built tree.
///
/// - `display="block"` is set in display mode.
/// - `xmlns` is set when the XML dialect is requested.
/// - With `annotate`, the tree is wrapped in `<semantics>` together with an
///   `<annotation encoding="application/x-tex">` holding the source.
pub fn build_mathml(
    ctx: &MathContext,
    tree: &[AnyParseNode],
    tex_expression: &str,
    settings: &Settings,
) -> Result<MathNode, ParseError> {
    let style = if settings.display_mode {
        style::DISPLAY
    } else {
        style::TEXT
    };

    let expression = build_expression(ctx, tree, &style)?;
    let is_row = matches!(
        expression.as_slice(),
        [MathDomNode::Math(node)] if node.node_type == MathNodeType::Mrow
    );
    let wrapper = if is_row {
        make_row(expression)
    } else {
        MathNode::with_children(MathNodeType::Mrow, expression).into()
    };

    let content = if settings.annotate {
        let annotation = MathNode::with_children(
            MathNodeType::Annotation,
            vec![TextNode::new(tex_expression).into()],
        )
        .attr("encoding", "application/x-tex");
        MathNode::with_children(MathNodeType::Semantics, vec![wrapper, annotation.into()]).into()
    } else {
        wrapper
    };

    let mut math = MathNode::with_children(MathNodeType::Math, vec![content]);
    if settings.xml {
        math.set_attribute("xmlns", MATHML_NAMESPACE);
    }
    if settings.display_mode {
        math.set_attribute("display", "block");
    }
    Ok(math)
}
