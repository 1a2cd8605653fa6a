//! Sakoe-Chiba band constraint for the alignment grid.

use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// Requested warp window half-width.
///
/// The engine widens it to at least `|n1 - n2|` so a path from `(1,1)` to
/// `(n1,n2)` always fits inside the band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandConstraint {
    min_half_width: usize,
}

impl BandConstraint {
    /// Create a band with the given minimum half-width.
    #[must_use]
    pub fn new(min_half_width: usize) -> Self {
        Self { min_half_width }
    }

    /// Return the requested minimum half-width.
    #[must_use]
    pub fn min_half_width(&self) -> usize {
        self.min_half_width
    }

    /// Half-width actually used for series of length `n1` and `n2`:
    /// `max(w0, |n1 - n2|)`.
    #[must_use]
    pub fn effective_half_width(&self, n1: usize, n2: usize) -> usize {
        self.min_half_width.max(n1.abs_diff(n2))
    }

    /// Columns computed for 1-based `row` of the cost matrix:
    /// `[max(1, row - w), min(n_cols, row + w)]`.
    ///
    /// Empty when the band misses the grid entirely for this row.
    #[must_use]
    pub fn column_range(half_width: usize, row: usize, n_cols: usize) -> RangeInclusive<usize> {
        let start = row.saturating_sub(half_width).max(1);
        let end = row.saturating_add(half_width).min(n_cols);
        start..=end
    }

    /// Maximum number of stored columns in any row: `min(2w + 1, n_cols)`.
    #[must_use]
    pub fn band_width(half_width: usize, n_cols: usize) -> usize {
        half_width
            .saturating_mul(2)
            .saturating_add(1)
            .min(n_cols)
    }
}

impl TryFrom<i64> for BandConstraint {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(Self::new)
            .map_err(|_| ConfigError::NegativeBandWidth { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_widens_to_length_difference() {
        assert_eq!(BandConstraint::new(0).effective_half_width(3, 5), 2);
        assert_eq!(BandConstraint::new(1).effective_half_width(9, 4), 5);
        assert_eq!(BandConstraint::new(7).effective_half_width(9, 4), 7);
    }

    #[test]
    fn column_range_middle_row() {
        assert_eq!(BandConstraint::column_range(2, 5, 10), 3..=7);
    }

    #[test]
    fn column_range_first_row_clamps_to_one() {
        assert_eq!(BandConstraint::column_range(2, 1, 10), 1..=3);
    }

    #[test]
    fn column_range_last_row_clamps_to_n_cols() {
        assert_eq!(BandConstraint::column_range(2, 10, 10), 8..=10);
    }

    #[test]
    fn column_range_zero_width_is_diagonal() {
        assert_eq!(BandConstraint::column_range(0, 4, 10), 4..=4);
    }

    #[test]
    fn column_range_huge_width() {
        assert_eq!(BandConstraint::column_range(usize::MAX, 3, 5), 1..=5);
    }

    #[test]
    fn band_width_caps_at_columns() {
        assert_eq!(BandConstraint::band_width(2, 52), 5);
        assert_eq!(BandConstraint::band_width(20, 5), 5);
        assert_eq!(BandConstraint::band_width(usize::MAX, 5), 5);
    }

    #[test]
    fn rejects_negative_band() {
        let result = BandConstraint::try_from(-1_i64);
        assert!(matches!(result, Err(ConfigError::NegativeBandWidth { value: -1 })));
        assert_eq!(BandConstraint::try_from(4_i64).unwrap().min_half_width(), 4);
        assert_eq!(BandConstraint::try_from(0_i64).unwrap(), BandConstraint::new(0));
    }
}
