//! Function definition utilities
//!
//! A command family is described by a [`FunctionDefSpec`]: the names it
//! answers to, how its arguments are parsed, the handler that turns parsed
//! arguments into an AST node, and the builder that turns that node into
//! MathML. [`MathContext::define_function`](crate::MathContext::define_function)
//! installs it into the registry.

use crate::MathContext;
use crate::mathml_tree::MathDomNode;
use crate::parser::Parser;
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::style::Style;
use crate::types::{ArgType, ErrorLocationProvider as _, SourceLocation};
use crate::types::{ParseError, Token};

/// Context structure passed to function handlers during parsing.
pub struct FunctionContext<'a, 'b> {
    /// Function name, including the leading backslash
    pub func_name: String,
    /// Parser instance
    pub parser: &'a mut Parser<'b>,
    /// The token that triggered the call, if any
    pub token: Option<&'a Token>,
}

impl FunctionContext<'_, '_> {
    /// Get the SourceLocation of the current token, if available.
    #[must_use]
    pub fn loc(&self) -> Option<SourceLocation> {
        let t = self.token?;
        t.loc().cloned()
    }
}

/// Type alias for function handlers that turn parsed arguments into a node.
pub type FunctionHandler = fn(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

/// Type alias for functions that build MathML nodes from parse nodes.
///
/// Builders receive the style by reference and must derive child styles
/// with [`Style::with_level`] rather than changing shared state.
pub type MathMLBuilder =
    fn(node: &ParseNode, style: &Style, ctx: &MathContext) -> Result<MathDomNode, ParseError>;

/// Properties that control how a function's arguments are parsed.
#[derive(Debug, Clone)]
pub struct FunctionPropSpec {
    /// The number of required arguments
    pub num_args: usize,

    /// The mode each argument is parsed in, optional arguments first
    pub arg_types: Option<Vec<ArgType>>,

    /// Whether the function is allowed inside text mode
    pub allowed_in_text: bool,

    /// Whether the function is allowed inside math mode
    pub allowed_in_math: bool,

    /// The number of optional (bracketed) arguments, parsed before the
    /// required ones
    pub num_optional_args: usize,
}

impl Default for FunctionPropSpec {
    fn default() -> Self {
        Self {
            num_args: 0,
            arg_types: None,
            allowed_in_text: false,
            allowed_in_math: true,
            num_optional_args: 0,
        }
    }
}

/// Complete specification for defining a command family.
pub struct FunctionDefSpec<'b> {
    /// Node type produced by the handler; keys the builder
    pub node_type: Option<NodeType>,

    /// Function names
    pub names: &'b [&'b str],

    /// Properties that control how functions are parsed
    pub props: FunctionPropSpec,

    /// Handler function
    pub handler: Option<FunctionHandler>,

    /// MathML builder function
    pub mathml_builder: Option<MathMLBuilder>,
}

/// Runtime function specification stored in the registry.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    /// Node type produced by the handler
    pub node_type: Option<NodeType>,

    /// Number of arguments
    pub num_args: usize,

    /// Argument types
    pub arg_types: Option<Vec<ArgType>>,

    /// Allowed in text mode
    pub allowed_in_text: bool,

    /// Allowed in math mode
    pub allowed_in_math: bool,

    /// Number of optional arguments
    pub num_optional_args: usize,

    /// Handler function
    pub handler: Option<FunctionHandler>,
}

impl FunctionSpec {
    /// Argument type of argument `index`, counting optional arguments first.
    #[must_use]
    pub fn arg_type(&self, index: usize) -> ArgType {
        self.arg_types
            .as_ref()
            .and_then(|types| types.get(index))
            .copied()
            .unwrap_or(ArgType::Original)
    }
}

/// Normalizes a function argument into a list of elements.
#[must_use]
pub fn ord_argument(arg: &ParseNode) -> Vec<ParseNode> {
    if let ParseNode::OrdGroup(ord) = arg {
        return ord.body.clone();
    }
    vec![arg.clone()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::{ParseNodeMathOrd, ParseNodeOrdGroup};
    use crate::types::Mode;

    #[test]
    fn test_prop_defaults() {
        let props = FunctionPropSpec::default();
        assert_eq!(props.num_args, 0);
        assert_eq!(props.num_optional_args, 0);
        assert!(!props.allowed_in_text);
        assert!(props.allowed_in_math);
    }

    #[test]
    fn test_arg_type_falls_back_to_original() {
        let spec = FunctionSpec {
            node_type: None,
            num_args: 2,
            arg_types: Some(vec![ArgType::Text]),
            allowed_in_text: true,
            allowed_in_math: true,
            num_optional_args: 0,
            handler: None,
        };
        assert_eq!(spec.arg_type(0), ArgType::Text);
        assert_eq!(spec.arg_type(1), ArgType::Original);
    }

    #[test]
    fn test_ord_argument_unwraps_groups() {
        let x = ParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: "x".to_owned(),
        });
        let group = ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: Mode::Math,
            loc: None,
            body: vec![x.clone(), x.clone()],
        });
        assert_eq!(ord_argument(&group).len(), 2);
        assert_eq!(ord_argument(&x), vec![x]);
    }
}
