//! `\frac`

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeGenfrac};
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind};

/// Registers `\frac`
pub fn define_genfrac(ctx: &mut MathContext) -> Result<(), ParseError> {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Genfrac),
        names: &["\\frac"],
        props: FunctionPropSpec {
            num_args: 2,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let mut args = args.into_iter();
            let (Some(numer), Some(denom)) = (args.next(), args.next()) else {
                return Err(ParseError::new(ParseErrorKind::MissingArgument {
                    func: context.func_name,
                }));
            };
            Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
                mode: context.parser.mode,
                loc: context.loc(),
                numer,
                denom,
            })))
        }),
        mathml_builder: Some(mathml_builder),
    })
}

fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Genfrac(frac) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::Genfrac, node),
            node,
        ));
    };
    Ok(MathNode::with_children(
        MathNodeType::Mfrac,
        vec![
            build_group(ctx, &frac.numer, style)?,
            build_group(ctx, &frac.denom, style)?,
        ],
    )
    .into())
}
