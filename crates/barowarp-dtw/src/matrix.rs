//! Banded cumulative cost matrix.

use std::ops::RangeInclusive;

use crate::constraint::BandConstraint;
use crate::distance::AlignmentCost;

/// Cumulative DTW cost over the conceptual `(n1 + 1) x (n2 + 1)` grid.
///
/// Only the cells inside the Sakoe-Chiba band are stored. Row `i` (1-based)
/// keeps columns `column_range(i)` in a fixed-stride slot of width
/// `min(2w + 1, n2)`. Row 0 and column 0 are the DP seed and are not stored:
/// `(0, 0)` reads as `0` and every other border cell reads as `+inf`.
///
/// Cell `(i, j)` maps to flat index `(i - 1) * stride + (j - lo_i)` where
/// `lo_i = max(1, i - w)`. Reads outside the band return `+inf`, which makes the
/// matrix indistinguishable from a dense one padded with infinity.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    n1: usize,
    n2: usize,
    half_width: usize,
    stride: usize,
    cells: Vec<f64>,
}

impl CostMatrix {
    /// Allocate a matrix with every band cell set to `+inf`.
    pub(crate) fn new(n1: usize, n2: usize, half_width: usize) -> Self {
        let stride = BandConstraint::band_width(half_width, n2);
        Self {
            n1,
            n2,
            half_width,
            stride,
            cells: vec![f64::INFINITY; n1 * stride],
        }
    }

    /// Number of samples in the first series (last row index).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.n1
    }

    /// Number of samples in the second series (last column index).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.n2
    }

    /// Effective band half-width the matrix was filled with.
    #[must_use]
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Number of cells held in memory.
    #[must_use]
    pub fn stored_cells(&self) -> usize {
        self.cells.len()
    }

    /// Columns stored for 1-based `row`.
    #[must_use]
    pub fn column_range(&self, row: usize) -> RangeInclusive<usize> {
        BandConstraint::column_range(self.half_width, row, self.n2)
    }

    /// Cumulative cost at 1-based `(i, j)`; `+inf` for any unreachable or unstored cell.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == 0 || j == 0 {
            return if i == 0 && j == 0 { 0.0 } else { f64::INFINITY };
        }
        match self.slot(i, j) {
            Some(idx) => self.cells[idx],
            None => f64::INFINITY,
        }
    }

    /// Optimal cumulative cost of aligning both series in full, `cost(n1, n2)`.
    #[must_use]
    pub fn total_cost(&self) -> AlignmentCost {
        AlignmentCost::new(self.get(self.n1, self.n2))
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self
            .slot(i, j)
            .unwrap_or_else(|| panic!("cell ({i}, {j}) lies outside the band"));
        self.cells[idx] = value;
    }

    fn slot(&self, i: usize, j: usize) -> Option<usize> {
        if i > self.n1 || j > self.n2 {
            return None;
        }
        let range = self.column_range(i);
        if !range.contains(&j) {
            return None;
        }
        Some((i - 1) * self.stride + (j - range.start()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_cells() {
        let m = CostMatrix::new(3, 3, 1);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), f64::INFINITY);
        assert_eq!(m.get(2, 0), f64::INFINITY);
    }

    #[test]
    fn out_of_band_reads_infinity() {
        let mut m = CostMatrix::new(5, 5, 1);
        m.set(3, 2, 1.5);
        assert_eq!(m.get(3, 2), 1.5);
        assert_eq!(m.get(3, 5), f64::INFINITY);
        assert_eq!(m.get(1, 3), f64::INFINITY);
        assert_eq!(m.get(6, 6), f64::INFINITY);
    }

    #[test]
    fn stores_only_band() {
        let m = CostMatrix::new(100, 100, 2);
        assert_eq!(m.stored_cells(), 100 * 5);
    }

    #[test]
    fn distinct_cells_do_not_alias() {
        let mut m = CostMatrix::new(4, 6, 2);
        let mut expected = Vec::new();
        for i in 1..=4 {
            for j in m.column_range(i) {
                let v = (i * 10 + j) as f64;
                m.set(i, j, v);
                expected.push((i, j, v));
            }
        }
        for (i, j, v) in expected {
            assert_eq!(m.get(i, j), v, "cell ({i}, {j})");
        }
    }

    #[test]
    #[should_panic(expected = "outside the band")]
    fn set_outside_band_panics() {
        let mut m = CostMatrix::new(5, 5, 0);
        m.set(2, 3, 1.0);
    }
}
