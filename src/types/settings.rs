use core::fmt;

use alloc::sync::Arc;
use bon::bon;
use serde::Deserialize;
use strum::{AsRefStr, EnumString};

use crate::types::{ErrorLocationProvider, ParseError, ParseErrorKind};
use crate::utils::{KeyMap, protocol_from_url};

/// User macro table: control-sequence name (with its backslash) to the
/// replacement markup it expands to.
pub type MacroMap = KeyMap<String, String>;

/// Levels of strictness for LaTeX compatibility checking.
///
/// # Cross-references
/// - See [`Settings::report_nonstrict`] for how strictness is enforced.
/// - Used in [`StrictSetting`] and [`StrictReturn`] for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StrictMode {
    /// Ignore non-standard input silently.
    Ignore,
    /// Log a warning about non-standard input but continue processing.
    Warn,
    /// Reject non-standard input and fail the compile.
    Error,
}

/// Resolved configuration for one compile.
///
/// Settings are read-only once built. The only mutation they perform is the
/// documented write of a derived protocol into a caller-supplied
/// [`TrustContext`] (see [`Settings::is_trusted`]), so a single instance can
/// be shared by concurrent compiles.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Whether expressions are laid out in display (block) mode.
    pub display_mode: bool,
    /// Whether the source markup is attached to the output as an annotation.
    pub annotate: bool,
    /// Whether equation numbers are placed on the left side.
    pub leqno: bool,
    /// Color used for rendered error markers.
    pub error_color: String,
    /// Whether content should avoid overlapping equation tags.
    pub prevent_tag_lap: bool,
    /// User macro definitions.
    pub macros: MacroMap,
    /// Whether the output uses the XML dialect (adds an `xmlns` attribute).
    pub xml: bool,
    /// Whether `\color` changes the color of the following text.
    pub color_is_text_color: bool,
    /// LaTeX-compatibility enforcement policy.
    pub strict: StrictSetting,
    /// Security gate for capability-sensitive commands.
    pub trust: TrustSetting,
    /// Maximum permitted user-specified dimension, in ems. Never negative.
    pub max_size: f64,
    /// Maximum permitted macro-expansion steps.
    pub max_expand: usize,
}

#[bon]
impl Settings {
    /// Creates a new [`Settings`] instance from optional configuration values.
    ///
    /// Only a missing (`None`) option is replaced by its default. An
    /// explicitly supplied `false`, `0` or `""` is kept as given.
    ///
    /// # Default Values
    /// - `display_mode`, `annotate`, `leqno`, `prevent_tag_lap`, `xml`,
    ///   `color_is_text_color`: `false`
    /// - `error_color`: `"#b22222"`
    /// - `macros`: empty
    /// - `strict`: `StrictSetting::Bool(false)`
    /// - `trust`: `TrustSetting::Bool(false)`
    /// - `max_size`: `f64::INFINITY`
    /// - `max_expand`: `1000`
    ///
    /// Negative `max_size` and `max_expand` values are floored to zero.
    #[must_use]
    #[builder]
    pub fn new(
        /// Display mode (true for block, false for inline).
        display_mode: Option<bool>,
        /// Attach the source markup as an annotation.
        annotate: Option<bool>,
        /// Left equation numbers.
        leqno: Option<bool>,
        /// Color for rendering errors.
        error_color: Option<String>,
        /// Avoid overlap between content and equation tags.
        prevent_tag_lap: Option<bool>,
        /// User macro definitions.
        macros: Option<MacroMap>,
        /// Output dialect switch.
        xml: Option<bool>,
        /// Whether `\color` affects surrounding text color.
        color_is_text_color: Option<bool>,
        /// Strict mode configuration.
        strict: Option<StrictSetting>,
        /// Trust configuration for dangerous content.
        trust: Option<TrustSetting>,
        /// Maximum allowed size in ems.
        max_size: Option<f64>,
        /// Maximum macro expansion steps.
        max_expand: Option<i64>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            annotate: annotate.unwrap_or(false),
            leqno: leqno.unwrap_or(false),
            error_color: error_color.unwrap_or_else(|| "#b22222".to_owned()),
            prevent_tag_lap: prevent_tag_lap.unwrap_or(false),
            macros: macros.unwrap_or_default(),
            xml: xml.unwrap_or(false),
            color_is_text_color: color_is_text_color.unwrap_or(false),
            strict: strict.unwrap_or_default(),
            trust: trust.unwrap_or_default(),
            max_size: max_size.unwrap_or(f64::INFINITY).max(0.0),
            max_expand: usize::try_from(max_expand.unwrap_or(1000).max(0)).unwrap_or(usize::MAX),
        }
    }

    /// Reports non-standard LaTeX input according to the strict policy.
    ///
    /// # Returns
    /// - `Ok(())` if the input is accepted (ignore or warn).
    /// - `Err(ParseError)` with [`ParseErrorKind::StrictModeViolation`] if
    ///   the policy resolves to [`StrictMode::Error`].
    ///
    /// A warning is emitted through `tracing` when the policy resolves to
    /// [`StrictMode::Warn`].
    pub fn report_nonstrict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> Result<(), ParseError> {
        match self.resolve_strict(error_code, error_msg, token) {
            StrictMode::Ignore => Ok(()),
            StrictMode::Warn => {
                tracing::warn!(
                    code = error_code,
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg}"
                );
                Ok(())
            }
            StrictMode::Error => Err(ParseError::with_optional_token(
                ParseErrorKind::StrictModeViolation {
                    code: error_code.to_owned(),
                    message: error_msg.to_owned(),
                },
                token,
            )),
        }
    }

    /// Determines whether strict (LaTeX-adhering) behavior should be enforced.
    ///
    /// Unlike [`Settings::report_nonstrict`] this never fails: it returns
    /// `true` when the policy resolves to [`StrictMode::Error`] and leaves it
    /// to the caller to raise a more specific error. In warn mode the warning
    /// is logged and `false` is returned.
    #[must_use]
    pub fn use_strict_behavior(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> bool {
        match self.resolve_strict(error_code, error_msg, token) {
            StrictMode::Ignore => false,
            StrictMode::Error => true,
            StrictMode::Warn => {
                tracing::warn!(
                    code = error_code,
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg}"
                );
                false
            }
        }
    }

    /// Evaluates whether a capability-sensitive command should be executed.
    ///
    /// `context.command` names the control sequence; other fields are
    /// command-specific.
    ///
    /// # Side effect
    /// If `context.url` is set and `context.protocol` is not, the protocol is
    /// derived from the URL and **written back into `context`**. Pass an
    /// owned context per command occurrence; use
    /// [`TrustContext::with_protocol`] for a copy-returning variant.
    ///
    /// A URL with a malformed scheme leaves `protocol` as `None`; the trust
    /// policy still decides.
    pub fn is_trusted(&self, context: &mut TrustContext) -> bool {
        if context.protocol.is_none()
            && let Some(url) = &context.url
        {
            context.protocol = protocol_from_url(url);
        }

        match &self.trust {
            TrustSetting::Bool(b) => *b,
            TrustSetting::Function(f) => f(context).unwrap_or(false),
        }
    }

    /// Resolve the strict setting into a concrete mode for one report.
    fn resolve_strict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> StrictMode {
        match &self.strict {
            StrictSetting::Mode(m) => *m,
            StrictSetting::Bool(b) => StrictReturn::Bool(*b).into(),
            StrictSetting::Function(f) => {
                f(error_code, error_msg, token).map_or(StrictMode::Ignore, StrictMode::from)
            }
        }
    }

    /// Builds settings from a deserialized option record.
    pub fn from_options(options: SettingsOptions) -> Result<Self, ParseError> {
        let strict = options
            .strict
            .map(|strict| match strict {
                StrictOption::Bool(b) => Ok(StrictSetting::Bool(b)),
                StrictOption::Tag(tag) => tag.parse::<StrictMode>().map(StrictSetting::Mode),
            })
            .transpose()?;

        Ok(Self::builder()
            .maybe_display_mode(options.display_mode)
            .maybe_annotate(options.annotate)
            .maybe_leqno(options.leqno)
            .maybe_error_color(options.error_color)
            .maybe_prevent_tag_lap(options.prevent_tag_lap)
            .maybe_macros(options.macros)
            .maybe_xml(options.xml)
            .maybe_color_is_text_color(options.color_is_text_color)
            .maybe_strict(strict)
            .maybe_trust(options.trust.map(TrustSetting::Bool))
            .maybe_max_size(options.max_size)
            .maybe_max_expand(options.max_expand)
            .build())
    }

    /// Builds settings from a JSON option record such as
    /// `{"displayMode": true, "strict": "warn"}`.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Examples
    /// ```
    /// use texmath::Settings;
    ///
    /// let settings = Settings::from_json(r#"{"maxExpand": -4, "futureOption": 1}"#).unwrap();
    /// assert_eq!(settings.max_expand, 0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let options: SettingsOptions = serde_json::from_str(json)?;
        Self::from_options(options)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Serialized option record accepted by [`Settings::from_options`].
///
/// Field names follow the camelCase spelling of the public option surface.
/// Callbacks cannot be expressed here; use [`Settings::builder`] for
/// predicate-based `strict` and `trust` policies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOptions {
    /// See [`Settings::display_mode`].
    pub display_mode: Option<bool>,
    /// See [`Settings::annotate`].
    pub annotate: Option<bool>,
    /// See [`Settings::leqno`].
    pub leqno: Option<bool>,
    /// See [`Settings::error_color`].
    pub error_color: Option<String>,
    /// See [`Settings::prevent_tag_lap`].
    pub prevent_tag_lap: Option<bool>,
    /// See [`Settings::macros`].
    pub macros: Option<MacroMap>,
    /// See [`Settings::xml`].
    pub xml: Option<bool>,
    /// See [`Settings::color_is_text_color`].
    pub color_is_text_color: Option<bool>,
    /// Either a boolean or one of `"ignore"`, `"warn"`, `"error"`.
    pub strict: Option<StrictOption>,
    /// See [`Settings::trust`].
    pub trust: Option<bool>,
    /// See [`Settings::max_size`].
    pub max_size: Option<f64>,
    /// See [`Settings::max_expand`].
    pub max_expand: Option<i64>,
}

/// Serialized form of the `strict` option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StrictOption {
    /// `true` is strict (error), `false` is off.
    Bool(bool),
    /// A [`StrictMode`] tag.
    Tag(String),
}

/// Return type for strict policy callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictReturn {
    /// `true` maps to [`StrictMode::Error`], `false` to [`StrictMode::Ignore`].
    Bool(bool),
    /// Explicit strict mode.
    Mode(StrictMode),
}

impl From<StrictReturn> for StrictMode {
    fn from(value: StrictReturn) -> Self {
        match value {
            StrictReturn::Mode(m) => m,
            StrictReturn::Bool(true) => Self::Error,
            StrictReturn::Bool(false) => Self::Ignore,
        }
    }
}

/// Function signature for custom strict mode evaluation: error code, message
/// and optional source location in, policy decision out.
pub type StrictFunction =
    dyn Fn(&str, &str, Option<&dyn ErrorLocationProvider>) -> Option<StrictReturn> + Send + Sync;

/// Configuration for strict mode behavior.
///
/// Every variant is dispatched by [`Settings::report_nonstrict`]; a callback
/// resolves to one of the fixed modes per report.
#[derive(Clone)]
pub enum StrictSetting {
    /// Fixed strict mode level applied to all inputs.
    Mode(StrictMode),
    /// `true` maps to [`StrictMode::Error`], `false` to [`StrictMode::Ignore`].
    Bool(bool),
    /// Custom policy evaluated per report. `None` means ignore.
    Function(Arc<StrictFunction>),
}

impl fmt::Debug for StrictSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(m) => write!(f, "StrictSetting::Mode({m:?})"),
            Self::Bool(b) => write!(f, "StrictSetting::Bool({b})"),
            Self::Function(_) => write!(f, "StrictSetting::Function(<fn>)"),
        }
    }
}

impl Default for StrictSetting {
    fn default() -> Self {
        Self::Bool(false)
    }
}

/// Record passed to the trust gate describing the capability being requested.
///
/// # Cross-references
/// - See [`Settings::is_trusted`] for trust validation logic.
/// - Related to [`TrustSetting`] for configuring trust policies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustContext {
    /// The control sequence that triggered the check, e.g. `\href`.
    pub command: String,
    /// URL involved in the decision, for link and resource commands.
    pub url: Option<String>,
    /// Protocol of `url`, e.g. `https`. Derived by the gate when absent.
    pub protocol: Option<String>,
    /// CSS class name for class-injecting commands.
    pub class: Option<String>,
    /// Element id for id-injecting commands.
    pub id: Option<String>,
    /// Inline CSS for style-injecting commands.
    pub style: Option<String>,
}

impl TrustContext {
    /// Context for `command` with no further fields.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Context for a URL-carrying `command`.
    #[must_use]
    pub fn with_url(command: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with `protocol` derived from `url` when it was unset.
    ///
    /// This is the non-mutating counterpart of the write-back done by
    /// [`Settings::is_trusted`].
    #[must_use]
    pub fn with_protocol(mut self) -> Self {
        if self.protocol.is_none()
            && let Some(url) = &self.url
        {
            self.protocol = protocol_from_url(url);
        }
        self
    }
}

/// Function signature for custom trust evaluation.
pub type TrustFunction = dyn Fn(&TrustContext) -> Option<bool> + Send + Sync;

/// Configuration for the trust gate.
#[derive(Clone)]
pub enum TrustSetting {
    /// Trust (`true`) or reject (`false`) every capability-sensitive command.
    Bool(bool),
    /// Decide per context. `None` is treated as untrusted.
    Function(Arc<TrustFunction>),
}

impl fmt::Debug for TrustSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "TrustSetting::Bool({b})"),
            Self::Function(_) => write!(f, "TrustSetting::Function(<fn>)"),
        }
    }
}

impl Default for TrustSetting {
    fn default() -> Self {
        Self::Bool(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceLocation;
    use core::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn omitted_options_take_defaults() {
        let settings = Settings::default();
        assert!(!settings.display_mode);
        assert!(!settings.annotate);
        assert!(!settings.leqno);
        assert_eq!(settings.error_color, "#b22222");
        assert!(!settings.prevent_tag_lap);
        assert!(settings.macros.is_empty());
        assert!(!settings.xml);
        assert!(!settings.color_is_text_color);
        assert!(matches!(settings.strict, StrictSetting::Bool(false)));
        assert!(matches!(settings.trust, TrustSetting::Bool(false)));
        assert!(settings.max_size.is_infinite());
        assert_eq!(settings.max_expand, 1000);
    }

    #[test]
    fn falsy_values_are_kept() {
        let settings = Settings::builder()
            .error_color(String::new())
            .max_size(0.0)
            .max_expand(0)
            .display_mode(false)
            .build();
        assert_eq!(settings.error_color, "");
        assert_eq!(settings.max_size, 0.0);
        assert_eq!(settings.max_expand, 0);
    }

    #[test]
    fn negative_limits_are_floored() {
        let settings = Settings::builder().max_size(-3.5).max_expand(-20).build();
        assert_eq!(settings.max_size, 0.0);
        assert_eq!(settings.max_expand, 0);
    }

    #[test]
    fn report_nonstrict_off_is_noop() {
        let settings = Settings::builder().strict(StrictSetting::Bool(false)).build();
        assert!(settings.report_nonstrict("code", "msg", None).is_ok());
        let loc = SourceLocation::new(Arc::from("abc"), 0, 1);
        assert!(settings.report_nonstrict("", "", Some(&loc)).is_ok());
    }

    #[test]
    fn report_nonstrict_error_carries_code_and_message() {
        let settings = Settings::builder().strict(StrictSetting::Bool(true)).build();
        let loc = SourceLocation::new(Arc::from("abc"), 1, 2);
        let err = settings
            .report_nonstrict("unknownSymbol", "Unrecognized symbol", Some(&loc))
            .unwrap_err();
        match err.kind.as_ref() {
            ParseErrorKind::StrictModeViolation { code, message } => {
                assert_eq!(code, "unknownSymbol");
                assert_eq!(message, "Unrecognized symbol");
            }
            other => panic!("unexpected error kind {other:?}"),
        }
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn report_nonstrict_function_is_dispatched() {
        let settings = Settings::builder()
            .strict(StrictSetting::Function(Arc::new(|code, _, _| {
                (code == "fatal").then_some(StrictReturn::Mode(StrictMode::Error))
            })))
            .build();
        assert!(settings.report_nonstrict("benign", "msg", None).is_ok());
        assert!(settings.report_nonstrict("fatal", "msg", None).is_err());
    }

    #[test]
    fn warn_mode_continues() {
        let settings = Settings::builder()
            .strict(StrictSetting::Mode(StrictMode::Warn))
            .build();
        assert!(settings.report_nonstrict("code", "msg", None).is_ok());
        assert!(!settings.use_strict_behavior("code", "msg", None));
    }

    #[test]
    fn is_trusted_writes_back_protocol() {
        let settings = Settings::builder()
            .trust(TrustSetting::Function(Arc::new(|ctx| {
                Some(ctx.protocol.as_deref() != Some("javascript"))
            })))
            .build();

        let mut context = TrustContext::with_url(r"\href", "javascript:x");
        assert!(!settings.is_trusted(&mut context));
        assert_eq!(context.protocol.as_deref(), Some("javascript"));

        let mut context = TrustContext::with_url(r"\href", "https://x");
        assert!(settings.is_trusted(&mut context));
        assert_eq!(context.protocol.as_deref(), Some("https"));
    }

    #[test]
    fn is_trusted_keeps_explicit_protocol() {
        let settings = Settings::builder().trust(TrustSetting::Bool(true)).build();
        let mut context = TrustContext {
            protocol: Some("custom".to_owned()),
            ..TrustContext::with_url(r"\href", "https://x")
        };
        assert!(settings.is_trusted(&mut context));
        assert_eq!(context.protocol.as_deref(), Some("custom"));
    }

    #[test]
    fn malformed_scheme_is_left_to_the_policy() {
        let settings = Settings::builder().trust(TrustSetting::Bool(true)).build();
        let mut context = TrustContext::with_url(r"\href", "1bad://x");
        assert!(settings.is_trusted(&mut context));
        assert!(context.protocol.is_none());

        let denied = Settings::builder().trust(TrustSetting::Bool(false)).build();
        let mut context = TrustContext::with_url(r"\href", "1bad://x");
        assert!(!denied.is_trusted(&mut context));

        let seen = Arc::new(AtomicBool::new(false));
        let seen_in_policy = Arc::clone(&seen);
        let policy = Settings::builder()
            .trust(TrustSetting::Function(Arc::new(move |ctx: &TrustContext| {
                seen_in_policy.store(true, Ordering::SeqCst);
                Some(ctx.protocol.is_none())
            })))
            .build();
        let mut context = TrustContext::with_url(r"\href", "1bad://x");
        assert!(policy.is_trusted(&mut context));
        assert!(seen.load(Ordering::SeqCst));
    }

    #[test]
    fn with_protocol_does_not_touch_original() {
        let original = TrustContext::with_url(r"\url", "HTTP://x");
        let augmented = original.clone().with_protocol();
        assert!(original.protocol.is_none());
        assert_eq!(augmented.protocol.as_deref(), Some("http"));
    }

    #[test]
    fn from_json_reads_camel_case_and_ignores_unknown_fields() {
        let settings = Settings::from_json(
            r##"{"displayMode": true, "errorColor": "", "strict": "warn",
                "trust": true, "maxSize": -1, "somethingNew": [1, 2]}"##,
        )
        .unwrap();
        assert!(settings.display_mode);
        assert_eq!(settings.error_color, "");
        assert!(matches!(settings.strict, StrictSetting::Mode(StrictMode::Warn)));
        assert!(matches!(settings.trust, TrustSetting::Bool(true)));
        assert_eq!(settings.max_size, 0.0);
        assert_eq!(settings.max_expand, 1000);
    }

    #[test]
    fn from_json_rejects_unknown_strict_tag() {
        let err = Settings::from_json(r#"{"strict": "sometimes"}"#).unwrap_err();
        assert!(matches!(err.kind.as_ref(), ParseErrorKind::EnumParse(_)));
    }
}
