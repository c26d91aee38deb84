use core::fmt;

use crate::types::{ErrorLocationProvider, SourceLocation};

/// A lexed token: the text of a control sequence, brace, bracket or single
/// character, plus where it came from.
///
/// Tokens produced by macro expansion carry no location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token text, e.g. `\xrightarrow`, `{` or `x`.
    pub text: String,
    /// Source location, if the token was lexed from the input.
    pub loc: Option<SourceLocation>,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(text: impl Into<String>, loc: Option<SourceLocation>) -> Self {
        Self {
            text: text.into(),
            loc,
        }
    }

    /// The end-of-input marker.
    #[must_use]
    pub fn eof(loc: Option<SourceLocation>) -> Self {
        Self::new(Self::EOF, loc)
    }

    /// Text of the end-of-input marker.
    pub const EOF: &'static str = "EOF";

    /// Whether this token marks the end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.text == Self::EOF
    }

    /// Whether this token is a control sequence such as `\rlap`.
    #[must_use]
    pub fn is_control_sequence(&self) -> bool {
        self.text.starts_with('\\') && self.text.len() > 1
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}
