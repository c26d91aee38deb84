//! Em-based unit helpers for the geometry builders.
//!
//! Labels on extensible arrows are drawn at script size, so their padding
//! has to be expressed relative to the script font. The helpers here scale
//! a base em size by the style level and format the result the way the
//! output attributes expect:
//! - `em_scale` returns the font scale factor of a script level
//! - `label_size` formats a size at a level with exactly four decimals

/// Font scale factor of a style level.
///
/// Levels 0 and 1 (display, text) are full size; level 2 (script) is 70%;
/// level 3 and deeper (scriptscript) is 50%.
#[must_use]
pub const fn em_scale(level: usize) -> f64 {
    match level {
        0 | 1 => 1.0,
        2 => 0.7,
        _ => 0.5,
    }
}

/// Express `size` (in ems of the base font) in ems of the font at `level`.
///
/// The value is always formatted with four decimals, e.g. `"2.8571em"` or
/// `"4.0000em"`; trailing zeros are kept.
///
/// # Examples
/// ```
/// use texmath::units::label_size;
///
/// assert_eq!(label_size(2.0, 2), "2.8571em");
/// assert_eq!(label_size(2.0, 3), "4.0000em");
/// ```
#[must_use]
pub fn label_size(size: f64, level: usize) -> String {
    format!("{:.4}em", size / em_scale(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_em_scale_levels() {
        assert_eq!(em_scale(0), 1.0);
        assert_eq!(em_scale(1), 1.0);
        assert_eq!(em_scale(2), 0.7);
        assert_eq!(em_scale(3), 0.5);
        assert_eq!(em_scale(7), 0.5);
    }

    #[test]
    fn test_label_size_keeps_four_decimals() {
        assert_eq!(label_size(2.0, 2), "2.8571em");
        assert_eq!(label_size(2.0, 3), "4.0000em");
        assert_eq!(label_size(0.6, 2), "0.8571em");
        assert_eq!(label_size(-0.4, 2), "-0.5714em");
        assert_eq!(label_size(0.0, 2), "0.0000em");
        assert_eq!(label_size(1.75, 1), "1.7500em");
    }
}
