//! `\text`: literal text inside math

use crate::MathContext;
use crate::build_mathml::build_expression_row;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeText};
use crate::style::Style;
use crate::types::{ArgType, ParseError, ParseErrorKind};

/// Registers `\text`
pub fn define_text(ctx: &mut MathContext) -> Result<(), ParseError> {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Text),
        names: &["\\text"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Text]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let body = args.first().map(ord_argument).unwrap_or_default();
            Ok(ParseNode::Text(ParseNodeText {
                mode: context.parser.mode,
                loc: context.loc(),
                body,
            }))
        }),
        mathml_builder: Some(mathml_builder),
    })
}

/// Concatenate the characters of a body made only of symbols and groups of
/// symbols. `None` if anything else is inside.
fn plain_text(body: &[ParseNode], out: &mut String) -> Option<()> {
    for node in body {
        match node {
            ParseNode::OrdGroup(group) => plain_text(&group.body, out)?,
            _ => out.push_str(node.text()?),
        }
    }
    Some(())
}

/// A run of plain characters becomes one `<mtext>`; mixed content is built
/// node by node.
fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Text(group) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::Text, node),
            node,
        ));
    };

    let mut text = String::new();
    if plain_text(&group.body, &mut text).is_some() {
        return Ok(MathNode::with_text(MathNodeType::Mtext, text).into());
    }
    build_expression_row(ctx, &group.body, style)
}
