//! Banded DTW engine.

use tracing::{debug, instrument};

use crate::constraint::BandConstraint;
use crate::cost::CostModel;
use crate::distance::AlignmentCost;
use crate::matrix::CostMatrix;
use crate::path::{self, WarpPath};
use crate::series::SeriesView;

/// Outcome of one alignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Optimal cumulative cost, `C[n1][n2]`.
    pub cost: AlignmentCost,
    /// Optimal warp path in forward order.
    pub path: WarpPath,
    /// Number of tie events seen while backtracking.
    pub ties: usize,
    /// Band half-width actually used, `max(w0, |n1 - n2|)`.
    pub half_width: usize,
}

/// Immutable DTW configuration. Copyable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dtw {
    constraint: BandConstraint,
    cost_model: CostModel,
}

impl Dtw {
    /// Create an engine whose band half-width is at least `min_half_width`.
    #[must_use]
    pub fn new(min_half_width: usize) -> Self {
        Self::from_constraint(BandConstraint::new(min_half_width))
    }

    /// Create an engine from an existing [`BandConstraint`].
    #[must_use]
    pub fn from_constraint(constraint: BandConstraint) -> Self {
        Self {
            constraint,
            cost_model: CostModel::default(),
        }
    }

    /// Replace the local cost model.
    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Return the band constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// Return the local cost model.
    #[must_use]
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Compute only the optimal cumulative cost.
    ///
    /// Uses a rolling two-row buffer rather than the full banded matrix: O(n1 * w)
    /// time and O(w) space. Always equal to `self.fill(a, b).total_cost()`.
    #[must_use]
    #[instrument(skip(a, b), fields(n1 = a.len(), n2 = b.len()))]
    pub fn cost(&self, a: SeriesView<'_>, b: SeriesView<'_>) -> AlignmentCost {
        AlignmentCost::new(self.rolling_cost(a, b))
    }

    /// Fill the banded cost matrix.
    ///
    /// Row `i` covers columns `[max(1, i - w), min(n2, i + w)]` with
    /// `w = max(w0, |n1 - n2|)`, and
    /// `C[i][j] = cost(a[i-1], b[j-1]) + min(C[i-1][j], C[i][j-1], C[i-1][j-1])`.
    /// Runs in O(n1 * w) time and space.
    #[must_use]
    #[instrument(skip(a, b), fields(n1 = a.len(), n2 = b.len()))]
    pub fn fill(&self, a: SeriesView<'_>, b: SeriesView<'_>) -> CostMatrix {
        let (n1, n2) = (a.len(), b.len());
        let w = self.constraint.effective_half_width(n1, n2);
        let mut matrix = CostMatrix::new(n1, n2, w);

        for i in 1..=n1 {
            let ai = a[i - 1].value;
            for j in matrix.column_range(i) {
                let best = matrix
                    .get(i - 1, j)
                    .min(matrix.get(i, j - 1))
                    .min(matrix.get(i - 1, j - 1));
                let value = self.cost_model.cost(ai, b[j - 1].value) + best;
                matrix.set(i, j, value);
            }
        }

        debug!(
            half_width = w,
            stored_cells = matrix.stored_cells(),
            total_cost = matrix.total_cost().value(),
            "cost matrix filled"
        );
        matrix
    }

    /// Fill the cost matrix and backtrack the optimal warp path.
    ///
    /// The matrix is dropped once the path has been recovered.
    #[must_use]
    #[instrument(skip(a, b), fields(n1 = a.len(), n2 = b.len()))]
    pub fn align(&self, a: SeriesView<'_>, b: SeriesView<'_>) -> Alignment {
        let matrix = self.fill(a, b);
        let (path, ties) = path::reconstruct(&matrix);
        debug!(ties, path_len = path.len(), "tie events during backtracking");
        Alignment {
            cost: matrix.total_cost(),
            path,
            ties,
            half_width: matrix.half_width(),
        }
    }

    /// Rolling two-row buffer DP.
    ///
    /// Each row buffer has `bw + 2` slots. Slot `k` of a row holds column
    /// `start + k - 1`, so slot 0 is a left sentinel (INF) and slots past the
    /// row's last column stay INF. Row 0 is seeded with `start = 0` and slot 1
    /// (column 0) set to zero.
    fn rolling_cost(&self, a: SeriesView<'_>, b: SeriesView<'_>) -> f64 {
        let (n1, n2) = (a.len(), b.len());
        let w = self.constraint.effective_half_width(n1, n2);
        let buf_width = BandConstraint::band_width(w, n2) + 2;

        let mut prev = vec![f64::INFINITY; buf_width];
        let mut curr = vec![f64::INFINITY; buf_width];
        let mut prev_start = 0usize;
        prev[1] = 0.0;

        for i in 1..=n1 {
            curr.fill(f64::INFINITY);
            let cols = BandConstraint::column_range(w, i, n2);
            let curr_start = *cols.start();
            let ai = a[i - 1].value;

            for j in cols {
                let cj = j - curr_start + 1;
                let above = read_slot(&prev, prev_start, j);
                let diag = read_slot(&prev, prev_start, j - 1);
                let left = curr[cj - 1];
                curr[cj] = self.cost_model.cost(ai, b[j - 1].value) + above.min(left).min(diag);
            }

            prev_start = curr_start;
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap, `prev` holds row n1.
        read_slot(&prev, prev_start, n2)
    }
}

/// Read column `j` from a rolling row buffer whose slot 1 holds column `start`.
fn read_slot(row: &[f64], start: usize, j: usize) -> f64 {
    if j < start {
        return f64::INFINITY;
    }
    row.get(j - start + 1).copied().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WarpStep;
    use crate::series::Series;

    fn series(values: &[f64]) -> Series {
        Series::from_pairs(values.iter().enumerate().map(|(i, &v)| (i as f64 * 1000.0, v)))
            .unwrap()
    }

    #[test]
    fn identical_series_cost_zero() {
        let s = series(&[10.0, 10.0, 10.0]);
        let alignment = Dtw::new(1).align(s.as_view(), s.as_view());
        assert_eq!(alignment.cost.value(), 0.0);
        assert_eq!(
            alignment.path.steps(),
            &[WarpStep::new(0, 0), WarpStep::new(1, 1), WarpStep::new(2, 2)]
        );
    }

    #[test]
    fn hand_computed_quadratic() {
        // a = [0, 10], b = [0, 0]
        // C[1][1] = 0
        // C[1][2] = 0 + C[1][1] = 0
        // C[2][1] = 100 + C[1][1] = 100
        // C[2][2] = 100 + min(C[1][2], C[2][1], C[1][1]) = 100
        let a = series(&[0.0, 10.0]);
        let b = series(&[0.0, 0.0]);
        let m = Dtw::new(1).fill(a.as_view(), b.as_view());
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
        assert_eq!(m.get(2, 1), 100.0);
        assert_eq!(m.get(2, 2), 100.0);
    }

    #[test]
    fn zero_band_forces_diagonal() {
        // Only diagonal cells exist: cost = 3 * 3^2 = 27.
        let a = series(&[0.0, 0.0, 0.0]);
        let b = series(&[3.0, 3.0, 3.0]);
        let alignment = Dtw::new(0).align(a.as_view(), b.as_view());
        assert_eq!(alignment.cost.value(), 27.0);
        for step in alignment.path.steps() {
            assert_eq!(step.a, step.b);
        }
    }

    #[test]
    fn band_widened_to_length_difference() {
        let a = series(&[1.0, 5.0, 9.0]);
        let b = series(&[1.0, 3.0, 5.0, 7.0, 9.0]);
        let alignment = Dtw::new(0).align(a.as_view(), b.as_view());
        assert_eq!(alignment.half_width, 2);
        assert!(alignment.cost.is_finite());
        assert_eq!(alignment.path.first(), Some(&WarpStep::new(0, 0)));
        assert_eq!(alignment.path.last(), Some(&WarpStep::new(2, 4)));
    }

    #[test]
    fn single_element_series() {
        let a = series(&[5.0]);
        let b = series(&[0.0]);
        let alignment = Dtw::new(0).align(a.as_view(), b.as_view());
        assert_eq!(alignment.cost.value(), 25.0);
        assert_eq!(alignment.path.steps(), &[WarpStep::new(0, 0)]);
    }

    #[test]
    fn rolling_matches_full_matrix() {
        let a = series(&[1.0, 5.0, 2.0, 8.0, 3.0, 12.0, 4.0]);
        let b = series(&[2.0, 4.0, 7.0, 11.0]);
        for w in 0..6 {
            let dtw = Dtw::new(w);
            let rolling = dtw.cost(a.as_view(), b.as_view());
            let full = dtw.fill(a.as_view(), b.as_view()).total_cost();
            assert_eq!(rolling.value(), full.value(), "band {w}");
        }
    }

    #[test]
    fn wider_band_never_costs_more() {
        let a = series(&[0.0, 6.0, 0.0, 6.0, 0.0]);
        let b = series(&[6.0, 0.0, 6.0, 0.0, 6.0]);
        let narrow = Dtw::new(0).cost(a.as_view(), b.as_view());
        let wide = Dtw::new(4).cost(a.as_view(), b.as_view());
        assert!(wide.value() <= narrow.value());
    }

    #[test]
    fn custom_cost_model_is_used() {
        let a = series(&[0.0]);
        let b = series(&[1.5]);
        let strict = CostModel::with_thresholds(1.0, 1.0).unwrap();
        let default_cost = Dtw::new(0).cost(a.as_view(), b.as_view());
        let strict_cost = Dtw::new(0).with_cost_model(strict).cost(a.as_view(), b.as_view());
        assert_eq!(default_cost.value(), 0.0);
        assert_eq!(strict_cost.value(), 2.25);
    }

    #[test]
    fn align_is_deterministic() {
        let a = series(&[0.0, 4.0, 4.0, 0.0, 4.0, 0.0]);
        let b = series(&[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0]);
        let dtw = Dtw::new(1);
        let first = dtw.align(a.as_view(), b.as_view());
        let second = dtw.align(a.as_view(), b.as_view());
        assert_eq!(first, second);
    }
}
