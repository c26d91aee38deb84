//! texmath - compile LaTeX-style math markup into a MathML presentation tree
//!
//! A compile runs three stages: the [`lexer`] splits the markup into tokens,
//! the [`parser`] builds a typed parse tree, and [`build_mathml`] walks that
//! tree into a [`mathml_tree::MathNode`]. Every command is looked up in a
//! [`MathContext`] registry, so new command families can be added without
//! touching the parser.
//!
//! ```rust
//! use texmath::{MathContext, Settings, render_to_string};
//!
//! fn main() -> Result<(), texmath::ParseError> {
//!     let ctx = MathContext::with_builtins()?;
//!     let markup = render_to_string(&ctx, r"A \xrightarrow{k} B", &Settings::default())?;
//!     assert!(markup.starts_with("<math>"));
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::impl_trait_in_params)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
pub mod build_mathml;
pub mod context;
pub mod core;
pub mod define_function;
pub mod functions;
pub mod lexer;
pub mod mathml_tree;
/// Core parsing logic for math markup.
pub mod parser;
pub mod stretchy;
pub mod style;
pub mod types;
pub mod units;
pub mod utils;

/// Registry of every command family the compiler understands.
///
/// Build one with [`MathContext::with_builtins`], register extra families
/// with [`MathContext::define_function`], then share it by reference across
/// compiles.
///
/// # Examples
///
/// ```rust
/// use texmath::MathContext;
///
/// let ctx = MathContext::with_builtins().unwrap();
/// assert!(ctx.functions.contains_key(r"\equilibrium"));
/// ```
pub use crate::context::MathContext;

/// Parses and builds an expression, returning MathML markup.
///
/// # Examples
///
/// ```rust
/// use texmath::{MathContext, Settings, render_to_string};
///
/// let ctx = MathContext::with_builtins().unwrap();
/// let settings = Settings::builder().display_mode(true).build();
/// let markup = render_to_string(&ctx, r"\mathrlap{x}", &settings).unwrap();
/// assert_eq!(
///     markup,
///     r#"<math display="block"><mrow><mpadded width="0px"><mi>x</mi></mpadded></mrow></math>"#
/// );
/// ```
///
/// Errors carry the position of the offending input:
/// ```rust
/// use texmath::{MathContext, Settings, render_to_string};
///
/// let ctx = MathContext::with_builtins().unwrap();
/// let err = render_to_string(&ctx, r"a \nosuch", &Settings::default()).unwrap_err();
/// assert_eq!(err.position, Some(2));
/// ```
pub use crate::core::render_to_string;

/// Parse an expression and return the parse tree.
///
/// NOTE: the tree representation is unstable and likely to change.
pub use crate::core::parse;

/// Parse and build an expression, returning the `<math>` node.
pub use crate::core::render_to_tree;

/// Error type for every failed compile.
///
/// Carries the categorised [`ParseErrorKind`](crate::types::ParseErrorKind)
/// and, when known, the `position` and `length` of the offending input.
pub use crate::types::ParseError;

/// Per-compile configuration, built with `Settings::builder()` or from a
/// JSON option record with [`Settings::from_json`].
pub use crate::types::Settings;
/// Strictness and trust configuration types used by [`Settings`].
pub use crate::types::{
    StrictFunction, StrictMode, StrictReturn, StrictSetting, TrustContext, TrustFunction,
    TrustSetting,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
