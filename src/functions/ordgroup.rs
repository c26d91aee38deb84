//! Braced groups

use crate::MathContext;
use crate::build_mathml::build_expression_row;
use crate::mathml_tree::MathDomNode;
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind};

/// Registers the builder for `{...}` groups
pub fn define_ordgroup(ctx: &mut MathContext) {
    ctx.define_function_builders(NodeType::OrdGroup, Some(mathml_builder));
}

fn mathml_builder(
    node: &ParseNode,
    style: &Style,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::OrdGroup(group) = node else {
        return Err(ParseError::with_token(
            ParseErrorKind::mismatch(NodeType::OrdGroup, node),
            node,
        ));
    };
    build_expression_row(ctx, &group.body, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_mathml::build_group;
    use crate::parser::Parser;
    use crate::types::Settings;

    fn markup(expr: &str) -> String {
        let ctx = MathContext::with_builtins().unwrap();
        let settings = Settings::default();
        let tree = Parser::new(expr, &settings, &ctx).parse().unwrap();
        build_group(&ctx, &tree[0], &Style::default())
            .unwrap()
            .to_markup()
            .unwrap()
    }

    #[test]
    fn test_single_child_is_unwrapped() {
        assert_eq!(markup("{x}"), "<mi>x</mi>");
    }

    #[test]
    fn test_groups_become_rows() {
        assert_eq!(markup("{xy}"), "<mrow><mi>x</mi><mi>y</mi></mrow>");
        assert_eq!(markup("{}"), "<mrow></mrow>");
    }
}
