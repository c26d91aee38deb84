//! Builders for single symbols: identifiers, numbers, operators and text
//! characters.

use crate::MathContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::style::Style;
use crate::types::{Mode, ParseError, ParseErrorKind};

/// Registers the builders for `mathord` and `textord` nodes
pub fn define_symbols_ord(ctx: &mut MathContext) {
    ctx.define_function_builders(NodeType::MathOrd, Some(mathord_builder));
    ctx.define_function_builders(NodeType::TextOrd, Some(textord_builder));
}

fn mathord_builder(
    node: &ParseNode,
    _style: &Style,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::MathOrd(ord) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::MathOrd, node),
            node,
        ));
    };
    Ok(MathNode::with_text(MathNodeType::Mi, &ord.text).into())
}

fn textord_builder(
    node: &ParseNode,
    _style: &Style,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::TextOrd(ord) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::TextOrd, node),
            node,
        ));
    };

    let node_type = match ord.mode {
        Mode::Text => MathNodeType::Mtext,
        Mode::Math if ord.text.chars().all(|c| c.is_ascii_digit()) => MathNodeType::Mn,
        Mode::Math => MathNodeType::Mo,
    };
    Ok(MathNode::with_text(node_type, &ord.text).into())
}
