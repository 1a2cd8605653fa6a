//! Cumulative alignment cost newtype.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative cumulative alignment cost. Infinite when no path fits the band.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AlignmentCost(f64);

impl AlignmentCost {
    /// Cost of an unreachable cell.
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw cost value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return true if a path reached the final cell.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for AlignmentCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
