//! The lexer turns markup into [`Token`]s one at a time.
//!
//! Token kinds:
//! - a run of whitespace, returned as a single `" "` token
//! - a control word (`\rlap`), with trailing whitespace skipped
//! - a doubled-backslash control word (`\\cdrightarrow`), used by the
//!   commutative-diagram arrows
//! - a control symbol (`\{`, `\,`)
//! - any other single character, together with its combining marks
//!
//! `%` starts a comment that runs to the end of the line.

use alloc::sync::Arc;

use crate::types::{ParseError, ParseErrorKind, Settings, SourceLocation, Token};

const fn is_combining_mark(ch: char) -> bool {
    (ch as u32) >= 0x0300 && (ch as u32) <= 0x036F
}

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_letters(s: &str) -> usize {
    s.chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '@')
        .map(char::len_utf8)
        .sum()
}

/// `\` followed by letters; `\\` followed by letters is also one word.
fn match_control_word(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let (prefix, rest) = rest
        .strip_prefix('\\')
        .map_or((1, rest), |after| (2, after));
    let letters = match_letters(rest);
    (letters > 0).then_some(prefix + letters)
}

fn match_control_symbol(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next()? != '\\' {
        return None;
    }
    let c = chars.next()?;
    Some(1 + c.len_utf8())
}

fn match_normal_char_with_accents(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let u = first as u32;
    if u < 0x21 || (0xD800..=0xDFFF).contains(&u) || first == '\\' {
        return None;
    }
    let marks: usize = chars
        .take_while(|c| is_combining_mark(*c))
        .map(char::len_utf8)
        .sum();
    Some(first.len_utf8() + marks)
}

/// The core lexer for tokenizing markup.
pub struct Lexer<'a> {
    input: Arc<str>,
    last_index: usize,
    settings: &'a Settings,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` over `input`.
    #[must_use]
    pub const fn new(input: Arc<str>, settings: &'a Settings) -> Self {
        Self {
            input,
            last_index: 0,
            settings,
        }
    }

    fn loc(&self, start: usize, end: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(Arc::clone(&self.input), start, end))
    }

    /// Tokenizes and returns the next token from the current position.
    ///
    /// At the end of input an EOF token is returned, repeatedly.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.last_index;
            let Some(slice) = self.input.get(start..).filter(|s| !s.is_empty()) else {
                return Ok(Token::eof(self.loc(start, start)));
            };

            if let Some(len) = match_space(slice) {
                self.last_index += len;
                return Ok(Token::new(" ", self.loc(start, start + len)));
            }

            if slice.starts_with('%') {
                if let Some(rel_pos) = slice.find('\n') {
                    self.last_index = start + rel_pos + 1;
                } else {
                    self.last_index = self.input.len();
                    self.settings.report_nonstrict(
                        "commentAtEnd",
                        "% comment has no terminating newline; LaTeX would fail because of commenting the end of math mode (e.g. $)",
                        None,
                    )?;
                }
                continue;
            }

            if let Some(len) = match_control_word(slice) {
                let end = start + len;
                let skip = self
                    .input
                    .get(end..)
                    .and_then(match_space)
                    .unwrap_or_default();
                self.last_index = end + skip;
                return Ok(Token::new(&slice[..len], self.loc(start, end)));
            }

            let len = match_control_symbol(slice).or_else(|| match_normal_char_with_accents(slice));
            let Some(len) = len else {
                let ch = slice.chars().next().map_or(1, char::len_utf8);
                let token = Token::new(&slice[..ch], self.loc(start, start + ch));
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedToken {
                        found: token.text.clone(),
                    },
                    &token,
                ));
            };

            self.last_index += len;
            return Ok(Token::new(&slice[..len], self.loc(start, start + len)));
        }
    }

    /// Lex the whole input, dropping locations. Used for macro replacement
    /// text, whose tokens do not point into the document being compiled.
    pub fn tokenize_detached(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let mut token = self.lex()?;
            if token.is_eof() {
                return Ok(tokens);
            }
            token.loc = None;
            tokens.push(token);
        }
    }

    /// Returns the current byte position in the input string where the lexer
    /// will next read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.last_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrictMode;
    use crate::types::StrictSetting;

    fn lex_all(input: &str, settings: &Settings) -> Result<Vec<String>, ParseError> {
        let mut lexer = Lexer::new(Arc::from(input), settings);
        let mut out = Vec::new();
        loop {
            let token = lexer.lex()?;
            if token.is_eof() {
                return Ok(out);
            }
            out.push(token.text);
        }
    }

    #[test]
    fn test_token_kinds() {
        let settings = Settings::default();
        let tokens = lex_all(r"\rlap {x}  \, [a]", &settings).unwrap();
        assert_eq!(
            tokens,
            vec![r"\rlap", "{", "x", "}", " ", r"\,", " ", "[", "a", "]"]
        );
    }

    #[test]
    fn test_double_backslash_control_word() {
        let settings = Settings::default();
        let tokens = lex_all(r"\\cdrightarrow{f}", &settings).unwrap();
        assert_eq!(tokens, vec![r"\\cdrightarrow", "{", "f", "}"]);
    }

    #[test]
    fn test_token_locations() {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from(r"a \llap b"), &settings);
        lexer.lex().unwrap();
        lexer.lex().unwrap();
        let token = lexer.lex().unwrap();
        assert_eq!(token.text, r"\llap");
        let loc = token.loc.unwrap();
        assert_eq!((loc.start(), loc.end()), (2, 7));
        assert_eq!(lexer.position(), 8);
    }

    #[test]
    fn test_combining_marks_stay_with_base() {
        let settings = Settings::default();
        let tokens = lex_all("e\u{301}x", &settings).unwrap();
        assert_eq!(tokens, vec!["e\u{301}", "x"]);
    }

    #[test]
    fn test_comments() {
        let settings = Settings::default();
        assert_eq!(lex_all("a%note\nb", &settings).unwrap(), vec!["a", "b"]);
        assert_eq!(lex_all("a%tail", &settings).unwrap(), vec!["a"]);

        let strict = Settings::builder()
            .strict(StrictSetting::Mode(StrictMode::Error))
            .build();
        let err = lex_all("a%tail", &strict).unwrap_err();
        assert!(err.is_strict_mode_violation());
    }

    #[test]
    fn test_control_characters_rejected() {
        let settings = Settings::default();
        let err = lex_all("a\u{7}", &settings).unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_detached_tokens_have_no_location() {
        let settings = Settings::default();
        let tokens = Lexer::new(Arc::from(r"\xrightarrow{x}"), &settings)
            .tokenize_detached()
            .unwrap();
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| t.loc.is_none()));
    }
}
