//! Script-level style threaded through the build walk
//!
//! TeX distinguishes four style sizes: display, text, script and
//! scriptscript. Builders receive the current [`Style`] by reference and
//! derive child styles with [`Style::with_level`]; a style is never mutated
//! in place, so siblings always observe the level their parent was built
//! with.

/// Current script level. Level 0 is display, 1 text, 2 script, 3 and above
/// scriptscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Size level (0=display, 1=text, 2=script, 3=scriptscript)
    pub level: usize,
}

impl Style {
    /// Create a style at the given level.
    #[must_use]
    pub const fn new(level: usize) -> Self {
        Self { level }
    }

    /// Return a copy of this style at `level`. The receiver is unchanged.
    #[must_use]
    pub const fn with_level(&self, level: usize) -> Self {
        Self { level }
    }
}

impl Default for Style {
    fn default() -> Self {
        TEXT
    }
}

/// The display style, used for top-level expressions in display mode.
pub const DISPLAY: Style = Style::new(0);

/// The text style, used for inline expressions.
pub const TEXT: Style = Style::new(1);

/// The script style, used for arrow labels and other subordinate material.
pub const SCRIPT: Style = Style::new(2);

/// The scriptscript style, used for labels nested inside script material.
pub const SCRIPTSCRIPT: Style = Style::new(3);
