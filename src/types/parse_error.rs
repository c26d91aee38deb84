//! Parse error handling
//!
//! A single [`ParseError`] type is returned by every stage of a compile. It
//! carries the categorised [`ParseErrorKind`] plus, when known, where in the
//! source markup the problem occurred.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::types::{Mode, SourceLocation};

/// Error returned when a compile fails.
///
/// Errors are fail-fast: the first one aborts the whole document and no
/// partial tree is produced.
#[derive(Debug, Error)]
#[error("Math parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// The start position based on the passed-in token or node
    pub position: Option<usize>,
    /// The length of affected text based on the passed-in token or node
    pub length: Option<usize>,
    /// Additional context to render alongside the error.
    context: ParseErrorContext,
}

impl ParseError {
    /// Create a new ParseError with the given kind
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self::from_kind(kind.into(), ParseErrorContext::None, None, None)
    }

    /// Create a new ParseError with context from a token, node or location
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let mut position = None;
        let mut length = None;
        let context = token.loc().filter(|loc| loc.start() <= loc.end()).map_or(
            ParseErrorContext::None,
            |loc| {
                position = Some(loc.start());
                length = Some(loc.end().saturating_sub(loc.start()));
                ParseErrorContext::Location(loc.clone())
            },
        );

        Self::from_kind(kind.into(), context, position, length)
    }

    /// Like [`ParseError::with_token`], but tolerates a missing location.
    pub fn with_optional_token<T: Into<ParseErrorKind>>(
        kind: T,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> Self {
        match token {
            Some(t) => Self::with_token(kind, t),
            None => Self::new(kind),
        }
    }

    fn from_kind(
        kind: ParseErrorKind,
        context: ParseErrorContext,
        position: Option<usize>,
        length: Option<usize>,
    ) -> Self {
        Self {
            kind: Box::new(kind),
            position,
            length,
            context,
        }
    }

    /// Whether the error reports a command used with the wrong arity, in the
    /// wrong mode, or not defined at all.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self.kind.as_ref(),
            ParseErrorKind::TextModeOnly { .. }
                | ParseErrorKind::MissingArgument { .. }
                | ParseErrorKind::FunctionDisallowedInMode { .. }
                | ParseErrorKind::UndefinedControlSequence { .. }
                | ParseErrorKind::ExpectedToken { .. }
                | ParseErrorKind::UnexpectedToken { .. }
        )
    }

    /// Whether the error was raised by the strict-mode policy.
    #[must_use]
    pub fn is_strict_mode_violation(&self) -> bool {
        matches!(self.kind.as_ref(), ParseErrorKind::StrictModeViolation { .. })
    }
}

impl From<strum::ParseError> for ParseError {
    fn from(err: strum::ParseError) -> Self {
        Self::new(ParseErrorKind::EnumParse(err))
    }
}

impl From<fmt::Error> for ParseError {
    fn from(err: fmt::Error) -> Self {
        Self::new(ParseErrorKind::Format(err))
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ParseErrorKind::InvalidOptions(err))
    }
}

/// Describes the specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("LaTeX-incompatible input and strict mode is set to 'error': {message} [{code}]")]
    StrictModeViolation { code: String, message: String },
    #[error("{{{func}}} can be used only in text mode. Try {alternative}")]
    TextModeOnly { func: String, alternative: String },
    #[error("Expected group as argument to '{func}'")]
    MissingArgument { func: String },
    #[error("Can't use function '{func}' in {mode} mode")]
    FunctionDisallowedInMode { func: String, mode: Mode },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected '{found}'")]
    UnexpectedToken { found: String },
    #[error("Function '{name}' is already defined")]
    DuplicateFunction { name: String },
    #[error("No handler registered for function '{name}'")]
    NoFunctionHandler { name: String },
    #[error("Got group of unknown type: {group_type}")]
    UnknownGroupType { group_type: NodeType },
    #[error("Expected node of type {expected}, got {actual}")]
    NodeTypeMismatch { expected: NodeType, actual: NodeType },
    #[error("Unknown stacked arrow: {name}")]
    UnknownStackedArrow { name: String },
    #[error("Too many expansions: infinite loop or need to increase maxExpand setting")]
    TooManyExpansions,
    #[error("Invalid option record: {0}")]
    InvalidOptions(#[source] serde_json::Error),
    #[error("Invalid option value: {0}")]
    EnumParse(#[source] strum::ParseError),
    #[error("Failed to write markup")]
    Format(#[source] fmt::Error),
}

impl ParseErrorKind {
    /// Convenience for builders that receive a node of the wrong variant.
    #[must_use]
    pub fn mismatch(expected: NodeType, node: &AnyParseNode) -> Self {
        Self::NodeTypeMismatch {
            expected,
            actual: node.discriminant(),
        }
    }
}

#[derive(Debug)]
enum ParseErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ParseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(SourceLocation { input, start, end }) => {
                let input_len = input.len();
                if *start == input_len {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", start + 1)?;
                }

                let prefix_start = adjust_char_boundary(input, start.saturating_sub(15), false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..*start])?;
                for c in input[*start..*end].chars() {
                    write!(f, "{c}\u{0332}")?;
                }
                let suffix_end = adjust_char_boundary(input, (*end + 15).min(input_len), true);
                write!(f, "{}", &input[*end..suffix_end])?;
                if suffix_end < input_len {
                    write!(f, "\u{2026}")?;
                }
                Ok(())
            }
        }
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Trait for types that can provide error location information for ParseError
pub trait ErrorLocationProvider {
    /// Get the source location if available
    fn loc(&self) -> Option<&SourceLocation>;
}

impl ErrorLocationProvider for AnyParseNode {
    fn loc(&self) -> Option<&SourceLocation> {
        self.location()
    }
}
