//! Built-in command families
//!
//! Each submodule registers one family of commands into a
//! [`MathContext`](crate::MathContext): the names it answers to, how its
//! arguments are parsed, and the MathML builder for the node it produces.
//!
//! ## Key Components
//!
//! - **Extensible arrows** (`arrow`): `\xrightarrow` and friends, the
//!   chemistry arrows, and the stacked pairs such as `\equilibrium`.
//! - **Overlaps** (`lap`): zero-width boxes that let content stick out to
//!   the left, to the right, or to both sides.
//! - **Ordinary nodes**: groups, symbols, `\frac`, `\hphantom` and `\text`.

mod arrow;
mod genfrac;
mod lap;
mod ordgroup;
mod phantom;
mod symbols_ord;
mod text;

/// Registers the extensible and stacked arrow commands.
///
/// # LaTeX Syntax
///
/// ```latex
/// \xrightarrow{f}          % label above
/// \xleftarrow[g]{f}        % labels above and below
/// \equilibrium[k_2]{k_1}   % stacked harpoons sharing both labels
/// ```
///
/// # Supported Commands
///
/// - `\xleftarrow`, `\xrightarrow`, `\xLeftarrow`, `\xRightarrow`
/// - `\xleftrightarrow`, `\xLeftrightarrow`, `\xhookleftarrow`,
///   `\xhookrightarrow`, `\xmapsto`
/// - `\xrightharpoondown`, `\xrightharpoonup`, `\xleftharpoondown`,
///   `\xleftharpoonup`, `\xlongequal`, `\xtwoheadrightarrow`,
///   `\xtwoheadleftarrow`
/// - `\yields`, `\yieldsLeft`, `\mesomerism`, `\longrightharpoonup`,
///   `\longleftharpoondown`
/// - `\\cdrightarrow`, `\\cdleftarrow`, `\\cdlongequal` (commutative
///   diagrams)
/// - stacked: `\xtofrom`, `\xleftrightharpoons`, `\xrightleftharpoons`,
///   `\yieldsLeftRight`, `\equilibrium`, `\equilibriumRight`,
///   `\equilibriumLeft`
///
/// # Errors
///
/// Fails with [`DuplicateFunction`](crate::types::ParseErrorKind::DuplicateFunction)
/// if any of the names is already registered.
pub use arrow::define_arrow;
pub use arrow::{ARROW_COMPONENTS, ArrowLength, munderover_node};

/// Registers `\mathllap`, `\mathrlap`, `\mathclap` and the text-mode forms
/// `\llap`, `\rlap`, `\clap`.
///
/// The text-mode forms used in math mode are rejected only when the strict
/// policy asks for it.
pub use lap::define_lap;

/// Registers `\frac`.
pub use genfrac::define_genfrac;

/// Registers the builder for braced groups.
pub use ordgroup::define_ordgroup;

/// Registers `\hphantom`.
pub use phantom::define_phantom;

/// Registers the builders for single symbols.
pub use symbols_ord::define_symbols_ord;

/// Registers `\text`.
pub use text::define_text;
