//! Horizontal overlap: `\mathllap`, `\mathrlap`, `\mathclap` and their
//! text-mode forms `\llap`, `\rlap`, `\clap`.

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{LapAlignment, NodeType, ParseNode, ParseNodeLap};
use crate::style::Style;
use crate::types::{ErrorLocationProvider, Mode, ParseError, ParseErrorKind};

/// Registers the lap functions
pub fn define_lap(ctx: &mut MathContext) -> Result<(), ParseError> {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Lap),
        names: &[
            "\\mathllap",
            "\\mathrlap",
            "\\mathclap",
            "\\clap",
            "\\llap",
            "\\rlap",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let func = context.func_name.as_str();
            let is_text_form = !func.starts_with("\\math");

            if is_text_form && context.parser.mode != Mode::Text {
                let message = format!("{func} can be used only in text mode");
                let strict = context.parser.settings.use_strict_behavior(
                    "textModeLap",
                    &message,
                    context.token.map(|t| t as &dyn ErrorLocationProvider),
                );
                if strict {
                    let kind = ParseErrorKind::TextModeOnly {
                        func: func.to_owned(),
                        alternative: format!("\\math{}", &func[1..]),
                    };
                    return Err(ParseError::with_optional_token(
                        kind,
                        context.token.map(|t| t as &dyn ErrorLocationProvider),
                    ));
                }
            }

            let alignment = match func.trim_start_matches("\\math").trim_start_matches('\\') {
                "llap" => LapAlignment::Llap,
                "clap" => LapAlignment::Clap,
                _ => LapAlignment::Rlap,
            };
            let Some(body) = args.into_iter().next() else {
                return Err(ParseError::new(ParseErrorKind::MissingArgument {
                    func: context.func_name,
                }));
            };

            Ok(ParseNode::Lap(ParseNodeLap {
                mode: context.parser.mode,
                loc: context.loc(),
                alignment,
                body: Box::new(body),
            }))
        }),
        mathml_builder: Some(mathml_builder),
    })
}

fn starts_with_fraction(body: &ParseNode) -> bool {
    matches!(
        body,
        ParseNode::OrdGroup(group) if matches!(group.body.first(), Some(ParseNode::Genfrac(_)))
    )
}

/// MathML builder for lap nodes: a zero-width `<mpadded>`.
fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Lap(lap) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::Lap, node),
            node,
        ));
    };

    let mut mpadded =
        MathNode::with_children(MathNodeType::Mpadded, vec![build_group(ctx, &lap.body, style)?]);

    match lap.alignment {
        LapAlignment::Llap => mpadded.set_attribute("lspace", "-1width"),
        LapAlignment::Clap => mpadded.set_attribute("lspace", "-0.5width"),
        // Firefox drops the thin space a fraction carries inside <mpadded>.
        LapAlignment::Rlap if starts_with_fraction(&lap.body) => {
            mpadded.set_attribute("lspace", "0.16667em");
        }
        LapAlignment::Rlap => {}
    }
    mpadded.set_attribute("width", "0px");

    Ok(mpadded.into())
}
