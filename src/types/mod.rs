//! Core type definitions shared by the parser, the registry and the builders

use strum::{AsRefStr, Display};

mod source_location;
pub use source_location::SourceLocation;

mod parse_error;
pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};

mod tokens;
pub use tokens::Token;

mod settings;
pub use settings::{
    MacroMap, Settings, SettingsOptions, StrictFunction, StrictMode, StrictOption, StrictReturn,
    StrictSetting, TrustContext, TrustFunction, TrustSetting,
};

/// The two parsing modes of the markup language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Math mode: letters are identifiers and whitespace is insignificant.
    Math,
    /// Text mode: characters are literal text and spaces are kept.
    Text,
}

/// How a single function argument should be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Parse in whatever mode the parser is currently in.
    Original,
    /// Parse the argument in math mode.
    Math,
    /// Parse the argument in text mode.
    Text,
}

impl ArgType {
    /// The mode an argument of this type is parsed in, given the current one.
    #[must_use]
    pub const fn mode(self, current: Mode) -> Mode {
        match self {
            Self::Original => current,
            Self::Math => Mode::Math,
            Self::Text => Mode::Text,
        }
    }
}
