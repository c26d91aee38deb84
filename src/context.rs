//! Command registry shared by the parser and the MathML builders

use crate::define_function::{FunctionDefSpec, FunctionSpec, MathMLBuilder};
use crate::functions;
use crate::parser::parse_node::NodeType;
use crate::types::{ParseError, ParseErrorKind};
use crate::utils::KeyMap;

/// Registry of every command the compiler understands.
///
/// The parser looks commands up in [`MathContext::functions`]; the build
/// walker looks builders up in [`MathContext::mathml_group_builders`] by the
/// discriminant of each node. Registration needs `&mut self` while compiles
/// borrow the context immutably, so the table cannot change mid-compile. A
/// built context is `Send + Sync` and can serve concurrent compiles.
#[derive(Default)]
pub struct MathContext {
    /// All registered functions, keyed by name including the backslash
    pub functions: KeyMap<String, FunctionSpec>,
    /// All MathML builders. Should be only used in the `define*` and the
    /// `build_mathml` functions.
    pub mathml_group_builders: KeyMap<NodeType, MathMLBuilder>,
}

impl MathContext {
    /// A context with every built-in command family registered.
    pub fn with_builtins() -> Result<Self, ParseError> {
        let mut ctx = Self::default();
        functions::define_ordgroup(&mut ctx);
        functions::define_symbols_ord(&mut ctx);
        functions::define_arrow(&mut ctx)?;
        functions::define_lap(&mut ctx)?;
        functions::define_genfrac(&mut ctx)?;
        functions::define_phantom(&mut ctx)?;
        functions::define_text(&mut ctx)?;
        tracing::debug!(
            functions = ctx.functions.len(),
            builders = ctx.mathml_group_builders.len(),
            "registered built-in functions"
        );
        Ok(ctx)
    }

    /// Register a command family.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseErrorKind::DuplicateFunction`] if any of the names
    /// is already registered. Nothing is registered in that case, so the
    /// earlier definition stays in effect.
    pub fn define_function(&mut self, spec: FunctionDefSpec) -> Result<(), ParseError> {
        if let Some(name) = spec.names.iter().find(|n| self.functions.contains_key(**n)) {
            return Err(ParseError::new(ParseErrorKind::DuplicateFunction {
                name: (*name).to_owned(),
            }));
        }

        let data = FunctionSpec {
            node_type: spec.node_type,
            num_args: spec.props.num_args,
            arg_types: spec.props.arg_types,
            allowed_in_text: spec.props.allowed_in_text,
            allowed_in_math: spec.props.allowed_in_math,
            num_optional_args: spec.props.num_optional_args,
            handler: spec.handler,
        };

        for name in spec.names {
            self.functions.insert((*name).to_owned(), data.clone());
        }

        if let Some(node_type) = spec.node_type {
            self.define_function_builders(node_type, spec.mathml_builder);
        }
        Ok(())
    }

    /// Register only the MathML builder for a node type. Used for node types
    /// that no command produces directly, such as ordgroups and symbols.
    pub fn define_function_builders(
        &mut self,
        node_type: NodeType,
        mathml_builder: Option<MathMLBuilder>,
    ) {
        if let Some(builder) = mathml_builder {
            self.mathml_group_builders.insert(node_type, builder);
        }
    }
}
