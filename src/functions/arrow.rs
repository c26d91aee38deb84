//! Extensible arrows and stacked arrow pairs
//!
//! Both families build on [`munderover_node`]: a stretchy `<mo>` glyph with
//! padded labels above and below. The padding is computed in ems of the
//! label's script font, because `<munderover>` sets its labels at script
//! level.

use phf::phf_map;

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::parser::parse_node::{
    AnyParseNode, NodeType, ParseNode, ParseNodeHphantom, ParseNodeStackedArrow, ParseNodeXArrow,
};
use crate::stretchy::math_ml_node;
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind};
use crate::units::label_size;

/// Extensible arrow commands
const ARROW_COMMANDS: &[&str] = &[
    "\\xleftarrow",
    "\\xrightarrow",
    "\\xLeftarrow",
    "\\xRightarrow",
    "\\xleftrightarrow",
    "\\xLeftrightarrow",
    "\\xhookleftarrow",
    "\\xhookrightarrow",
    "\\xmapsto",
    "\\xrightharpoondown",
    "\\xrightharpoonup",
    "\\xleftharpoondown",
    "\\xleftharpoonup",
    "\\xlongequal",
    "\\xtwoheadrightarrow",
    "\\xtwoheadleftarrow",
    // chemistry arrows
    "\\yields",
    "\\yieldsLeft",
    "\\mesomerism",
    "\\longrightharpoonup",
    "\\longleftharpoondown",
    // The next 3 functions are here only to support commutative diagrams.
    "\\\\cdrightarrow",
    "\\\\cdleftarrow",
    "\\\\cdlongequal",
];

/// The (upper, lower) arrows that make up each stacked arrow.
pub const ARROW_COMPONENTS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "\\xtofrom" => ("\\xrightarrow", "\\xleftarrow"),
    "\\xleftrightharpoons" => ("\\xleftharpoonup", "\\xrightharpoondown"),
    "\\xrightleftharpoons" => ("\\xrightharpoonup", "\\xleftharpoondown"),
    "\\yieldsLeftRight" => ("\\yields", "\\yieldsLeft"),
    // The equilibrium arrows share glyphs and differ in lengths and padding.
    "\\equilibrium" => ("\\longrightharpoonup", "\\longleftharpoondown"),
    "\\equilibriumRight" => ("\\longrightharpoonup", "\\eqleftharpoondown"),
    "\\equilibriumLeft" => ("\\eqrightharpoonup", "\\longleftharpoondown"),
};

/// Stacked arrow commands
const STACKED_ARROW_COMMANDS: &[&str] = &[
    "\\xtofrom",
    "\\xleftrightharpoons",
    "\\xrightleftharpoons",
    "\\yieldsLeftRight",
    "\\equilibrium",
    "\\equilibriumRight",
    "\\equilibriumLeft",
];

/// Length class of an arrow glyph, decided from its command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowLength {
    /// `\x...` extensible arrows
    Extensible,
    /// `\\cd...` commutative-diagram arrows
    Diagram,
    /// `\eq...`, the short half of an unbalanced equilibrium
    ShortHarpoon,
    /// Every other arrow, e.g. the chemistry arrows
    Default,
}

impl ArrowLength {
    /// Classify a command name, backslash included. The first matching rule
    /// wins:
    /// 1. second character `x`
    /// 2. third and fourth characters `cd`
    /// 3. second and third characters `eq`
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let chars: Vec<char> = name.chars().collect();
        let slice_is = |start: usize, expected: &str| {
            chars
                .get(start..start + expected.len())
                .is_some_and(|s| s.iter().copied().eq(expected.chars()))
        };
        if chars.get(1) == Some(&'x') {
            Self::Extensible
        } else if slice_is(2, "cd") {
            Self::Diagram
        } else if slice_is(1, "eq") {
            Self::ShortHarpoon
        } else {
            Self::Default
        }
    }

    /// Minimum glyph length in ems.
    #[must_use]
    pub const fn min_width(self) -> f64 {
        match self {
            Self::Extensible => 1.75,
            Self::Diagram => 3.0,
            Self::ShortHarpoon => 1.0,
            Self::Default => 2.0,
        }
    }

    /// The `minsize` attribute of the glyph.
    #[must_use]
    pub const fn min_size(self) -> &'static str {
        match self {
            Self::Extensible => "1.75em",
            Self::Diagram => "3.0em",
            Self::ShortHarpoon => "1.0em",
            Self::Default => "2.0em",
        }
    }

    /// The `rspace` attribute of the glyph.
    #[must_use]
    pub const fn rspace(self) -> &'static str {
        match self {
            Self::ShortHarpoon => "0.5em",
            _ => "0",
        }
    }
}

/// Whether a label has anything to show. Phantoms count when the content
/// they hide does, since they still take up its width.
fn has_content(node: &AnyParseNode) -> bool {
    match node {
        AnyParseNode::OrdGroup(group) => !group.body.is_empty(),
        AnyParseNode::Hphantom(phantom) => has_content(&phantom.body),
        _ => true,
    }
}

fn padded_node(child: Option<MathDomNode>, width: &str, lspace: &str) -> MathNode {
    MathNode::with_children(MathNodeType::Mpadded, child.into_iter().collect())
        .attr("width", width)
        .attr("lspace", lspace)
}

/// Build an arrow glyph with its upper (`body`) and lower (`below`) labels.
///
/// Children of the returned `<munderover>` are glyph, lower label, upper
/// label. A missing or empty label becomes an empty `<mpadded>` as wide as
/// the glyph's minimum length, so renderers that ignore `minsize` still
/// draw the arrow at full length.
pub fn munderover_node(
    ctx: &MathContext,
    name: &str,
    body: Option<&AnyParseNode>,
    below: Option<&AnyParseNode>,
    style: &Style,
) -> Result<MathNode, ParseError> {
    let length = ArrowLength::classify(name);
    let is_eq = length == ArrowLength::ShortHarpoon;

    let arrow_node = math_ml_node(name)
        .attr("minsize", length.min_size())
        .attr("lspace", "0")
        .attr("rspace", length.rspace());

    let label_style = style.with_level(style.level.max(2));
    let level = label_style.level;
    let empty_label_width = label_size(length.min_width(), level);
    let lspace = label_size(if is_eq { 0.0 } else { 0.3 }, level);
    let mut width_adder = label_size(if is_eq { -0.4 } else { 0.6 }, level);
    if !width_adder.starts_with('-') {
        width_adder.insert(0, '+');
    }

    let label = |group: Option<&AnyParseNode>| -> Result<MathDomNode, ParseError> {
        Ok(match group.filter(|g| has_content(g)) {
            Some(group) => padded_node(
                Some(build_group(ctx, group, &label_style)?),
                &width_adder,
                &lspace,
            ),
            None => padded_node(None, &empty_label_width, "0"),
        }
        .into())
    };
    let upper_node = label(body)?;
    let lower_node = label(below)?;

    Ok(MathNode::with_children(
        MathNodeType::Munderover,
        vec![arrow_node.into(), lower_node, upper_node],
    ))
}

/// Registers the extensible arrows and the stacked arrow pairs.
pub fn define_arrow(ctx: &mut MathContext) -> Result<(), ParseError> {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::XArrow),
        names: ARROW_COMMANDS,
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, opt_args| {
            let below = opt_args.into_iter().next().flatten().map(Box::new);
            Ok(ParseNode::XArrow(ParseNodeXArrow {
                mode: context.parser.mode,
                loc: context.loc(),
                label: context.func_name,
                body: args.into_iter().next().map(Box::new),
                below,
            }))
        }),
        mathml_builder: Some(mathml_builder),
    })?;

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::StackedArrow),
        names: STACKED_ARROW_COMMANDS,
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, opt_args| {
            let mode = context.parser.mode;
            let phantom = |node: &ParseNode| {
                ParseNode::Hphantom(ParseNodeHphantom {
                    mode,
                    loc: None,
                    body: Box::new(node.clone()),
                })
            };
            let body = args.into_iter().next();
            let below = opt_args.into_iter().next().flatten();
            Ok(ParseNode::StackedArrow(Box::new(ParseNodeStackedArrow {
                mode,
                loc: context.loc(),
                label: context.func_name,
                lower_arrow_body: body.as_ref().map(phantom),
                upper_arrow_below: below.as_ref().map(phantom),
                body,
                below,
            })))
        }),
        mathml_builder: Some(stacked_mathml_builder),
    })
}

/// MathML builder for single arrows: the arrow plus relation spacing.
fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::XArrow(xarrow) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::XArrow, node),
            node,
        ));
    };

    let arrow = munderover_node(
        ctx,
        &xarrow.label,
        xarrow.body.as_deref(),
        xarrow.below.as_deref(),
        style,
    )?;
    Ok(
        MathNode::with_children(MathNodeType::Mpadded, vec![arrow.into()])
            .attr("lspace", "0.2778em")
            .attr("width", "+0.5556em")
            .into(),
    )
}

/// MathML builder for stacked arrows.
///
/// The upper arrow is raised by 0.3em; one of the two arrows is given
/// (nearly) zero width so that both share the same horizontal origin.
fn stacked_mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::StackedArrow(group) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::StackedArrow, node),
            node,
        ));
    };
    let Some(&(top_label, bot_label)) = ARROW_COMPONENTS.get(group.label.as_str()) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnknownStackedArrow {
                name: group.label.clone(),
            },
            node,
        ));
    };

    let top_arrow = munderover_node(
        ctx,
        top_label,
        group.body.as_ref(),
        group.upper_arrow_below.as_ref(),
        style,
    )?;
    let bot_arrow = munderover_node(
        ctx,
        bot_label,
        group.lower_arrow_body.as_ref(),
        group.below.as_ref(),
        style,
    )?;

    let mut raise_node = MathNode::with_children(MathNodeType::Mpadded, vec![top_arrow.into()])
        .attr("voffset", "0.3em")
        .attr("height", "+0.3em")
        .attr("depth", "-0.3em");

    let children = if group.label == "\\equilibriumLeft" {
        let bot_node = MathNode::with_children(MathNodeType::Mpadded, vec![bot_arrow.into()])
            .attr("width", "0.5em");
        vec![bot_node.into(), raise_node.into()]
    } else {
        let width = if group.label == "\\equilibriumRight" {
            "0.5em"
        } else {
            "0"
        };
        raise_node.set_attribute("width", width);
        vec![raise_node.into(), bot_arrow.into()]
    };

    Ok(MathNode::with_children(MathNodeType::Mpadded, children)
        .attr("voffset", "-0.18em")
        .attr("width", "+0.5556em")
        .attr("height", "-0.18em")
        .attr("depth", "+0.18em")
        .attr("lspace", "0.2778em")
        .into())
}
