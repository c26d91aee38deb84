//! Shared helpers: hash map aliases, markup escaping and URL protocol
//! extraction for the trust gate.

use core::fmt;

use rapidhash::RapidHashMap;

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;

/// Escapes markup special characters in a string.
///
/// # Examples
/// ```
/// use texmath::utils::escape;
///
/// assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_into(&mut escaped, text);
    escaped
}

/// Writes the escaped representation of `text` into the provided writer.
#[inline]
pub fn escape_into<W: fmt::Write>(writer: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        let replacement = match ch {
            '&' => "&amp;",
            '>' => "&gt;",
            '<' => "&lt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => continue,
        };
        writer.write_str(&text[last..idx])?;
        writer.write_str(replacement)?;
        last = idx + ch.len_utf8();
    }
    writer.write_str(&text[last..])
}

/// Extracts the protocol (scheme) from a URL string.
///
/// Leading spaces and C0 control characters are skipped, the way URL parsers
/// do. The scheme is everything before the first colon that precedes any of
/// `\`, `/`, `#` or `?`.
///
/// # Returns
/// - `Some(protocol)`: the lowercased scheme.
/// - `Some("_relative")`: the URL has no scheme.
/// - `None`: the scheme is malformed, or the colon is spelled as an HTML
///   entity (`&#58;`, `&#x3a;`, `&colon;`).
///
/// # Examples
/// ```
/// use texmath::utils::protocol_from_url;
///
/// assert_eq!(protocol_from_url("https://example.com"), Some("https".to_owned()));
/// assert_eq!(protocol_from_url("/path/to/file"), Some("_relative".to_owned()));
/// assert_eq!(protocol_from_url("1invalid://example.com"), None);
/// ```
#[must_use]
pub fn protocol_from_url(url: &str) -> Option<String> {
    let s = url.trim_start_matches(|c: char| c <= '\u{20}');

    for (i, ch) in s.char_indices() {
        match ch {
            ':' => return validate_scheme(&s[..i]),
            '&' if starts_with_encoded_colon(&s[i..]) => return None,
            '\\' | '/' | '#' | '?' => break,
            _ => {}
        }
    }

    Some("_relative".to_owned())
}

/// Matches `&#0*58`, `&#x0*3a` and `&colon`, case-insensitively.
fn starts_with_encoded_colon(s: &str) -> bool {
    let lower = s.get(..s.len().min(32)).unwrap_or(s).to_ascii_lowercase();
    if lower.starts_with("&colon") {
        return true;
    }
    let Some(numeric) = lower.strip_prefix("&#") else {
        return false;
    };
    if let Some(hex) = numeric.strip_prefix('x') {
        hex.trim_start_matches('0').starts_with("3a")
    } else {
        numeric.trim_start_matches('0').starts_with("58")
    }
}

fn validate_scheme(scheme: &str) -> Option<String> {
    let mut chars = scheme.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some(scheme.to_ascii_lowercase())
}
