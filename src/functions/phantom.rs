//! `\hphantom`: keeps the width of its content and hides it

use crate::MathContext;
use crate::build_mathml::build_expression;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeHphantom};
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind};

/// Registers `\hphantom`
pub fn define_phantom(ctx: &mut MathContext) -> Result<(), ParseError> {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Hphantom),
        names: &["\\hphantom"],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let Some(body) = args.into_iter().next() else {
                return Err(ParseError::new(ParseErrorKind::MissingArgument {
                    func: context.func_name,
                }));
            };
            Ok(ParseNode::Hphantom(ParseNodeHphantom {
                mode: context.parser.mode,
                loc: context.loc(),
                body: Box::new(body),
            }))
        }),
        mathml_builder: Some(mathml_builder),
    })
}

fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Hphantom(hphantom) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::Hphantom, node),
            node,
        ));
    };

    let inner = build_expression(ctx, &ord_argument(&hphantom.body), style)?;
    let phantom = MathNode::with_children(MathNodeType::Mphantom, inner);
    Ok(
        MathNode::with_children(MathNodeType::Mpadded, vec![phantom.into()])
            .attr("height", "0px")
            .attr("depth", "0px")
            .into(),
    )
}
