//! Compile entry points: markup in, parse tree or MathML out

use crate::build_mathml::build_mathml;
use crate::mathml_tree::MathNode;
use crate::parser::Parser;
use crate::parser::parse_node::AnyParseNode;
use crate::types::{ParseError, Settings};
use crate::MathContext;

/// Parse an expression and return the parse tree
///
/// The tree representation is not stable across releases; prefer
/// [`render_to_tree`] or [`render_to_string`] for output.
pub fn parse(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<Vec<AnyParseNode>, ParseError> {
    tracing::debug!(len = expression.len(), "parsing expression");
    Parser::new(expression, settings, ctx).parse()
}

/// Parse and build an expression, returning the `<math>` node
pub fn render_to_tree(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<MathNode, ParseError> {
    let tree = parse(ctx, expression, settings)?;
    tracing::debug!(nodes = tree.len(), "building MathML tree");
    build_mathml(ctx, &tree, expression, settings)
}

/// Parse and build an expression, returning MathML markup
pub fn render_to_string(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<String, ParseError> {
    let markup = render_to_tree(ctx, expression, settings)?.to_markup()?;
    tracing::debug!(len = markup.len(), "serialized MathML markup");
    Ok(markup)
}
