use alloc::sync::Arc;
use core::fmt;

use crate::types::ErrorLocationProvider;

/// Represents a source location in a math expression.
///
/// Stores a shared copy of the input and byte offsets for the start and end
/// of the span, so that errors can point back into the original markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Input string that was lexed.
    pub input: Arc<str>,
    /// Zero-based inclusive start offset in the input string.
    pub start: usize,
    /// Zero-based exclusive end offset in the input string.
    pub end: usize,
}

impl SourceLocation {
    /// Creates a new `SourceLocation` over `input[start..end]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use texmath::types::SourceLocation;
    ///
    /// let loc = SourceLocation::new(Arc::from(r"\rlap{x}"), 0, 5);
    /// assert_eq!(loc.text(), r"\rlap");
    /// ```
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Zero-based inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Zero-based exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The slice of input covered by this location.
    #[must_use]
    pub fn text(&self) -> &str {
        self.input.get(self.start..self.end).unwrap_or_default()
    }

    /// Merges two locations into one spanning both, provided they come from
    /// the same input.
    #[must_use]
    pub fn range(first: Option<&Self>, second: Option<&Self>) -> Option<Self> {
        match (first, second) {
            (Some(a), Some(b)) if Arc::ptr_eq(&a.input, &b.input) => Some(Self {
                input: Arc::clone(&a.input),
                start: a.start.min(b.start),
                end: a.end.max(b.end),
            }),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_merges_same_input() {
        let input: Arc<str> = Arc::from(r"\xrightarrow{a}");
        let a = SourceLocation::new(Arc::clone(&input), 0, 12);
        let b = SourceLocation::new(Arc::clone(&input), 12, 15);
        let merged = SourceLocation::range(Some(&a), Some(&b)).unwrap();
        assert_eq!(merged.start(), 0);
        assert_eq!(merged.end(), 15);
        assert_eq!(merged.text(), r"\xrightarrow{a}");
    }

    #[test]
    fn range_rejects_different_inputs() {
        let a = SourceLocation::new(Arc::from("x"), 0, 1);
        let b = SourceLocation::new(Arc::from("x"), 0, 1);
        assert!(SourceLocation::range(Some(&a), Some(&b)).is_none());
    }
}
