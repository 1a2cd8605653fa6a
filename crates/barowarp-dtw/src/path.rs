//! Warp path types and backtracking through the cost matrix.

use tracing::debug;

use crate::matrix::CostMatrix;

/// A single step in a warp path, mapping index `a` in the first series
/// to index `b` in the second series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpStep {
    /// Index in the first series.
    pub a: usize,
    /// Index in the second series.
    pub b: usize,
}

impl WarpStep {
    /// Create a new step.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// An ordered sequence of warp steps from `(0, 0)` to `(n1-1, n2-1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpPath(Vec<WarpStep>);

impl WarpPath {
    /// Wrap an arbitrary step sequence.
    ///
    /// No shape checks are made here; paths produced by [`Dtw`](crate::Dtw)
    /// are always monotone staircases. Consumers such as the sampler validate
    /// what they rely on.
    #[must_use]
    pub fn from_steps(steps: Vec<WarpStep>) -> Self {
        Self(steps)
    }

    /// Return the warp steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the first step, if any.
    #[must_use]
    pub fn first(&self) -> Option<&WarpStep> {
        self.0.first()
    }

    /// Return the last step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&WarpStep> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a WarpPath {
    type Item = &'a WarpStep;
    type IntoIter = std::slice::Iter<'a, WarpStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Backtrack from `(n1, n2)` to `(1, 1)` and return the forward path together
/// with the number of tie events seen on the way.
///
/// Each move compares `diag = C[i-1][j-1]`, `left = C[i-1][j]` and
/// `down = C[i][j-1]` in this fixed order:
///
/// 1. diagonal when `diag <= left && diag <= down`
/// 2. left when it is strictly the smallest
/// 3. down when it is strictly the smallest
/// 4. otherwise down if `i <= j`, else left (pulls the path toward `i == j`)
///
/// A tie event is any pair of the three candidates comparing equal. Ties are
/// counted for diagnostics only.
///
/// The final cell must be finite, which holds whenever the band half-width is at
/// least `|n1 - n2|`.
pub(crate) fn reconstruct(matrix: &CostMatrix) -> (WarpPath, usize) {
    let (mut i, mut j) = (matrix.rows(), matrix.cols());
    debug_assert!(matrix.get(i, j).is_finite(), "final cell is unreachable");

    let mut steps = Vec::with_capacity(i + j - 1);
    steps.push(WarpStep::new(i - 1, j - 1));
    let mut ties = 0usize;

    while i > 1 || j > 1 {
        let diag = matrix.get(i - 1, j - 1);
        let left = matrix.get(i - 1, j);
        let down = matrix.get(i, j - 1);

        if diag <= left && diag <= down {
            i -= 1;
            j -= 1;
        } else if left < diag && left < down {
            i -= 1;
        } else if down < diag && down < left {
            j -= 1;
        } else if i <= j {
            j -= 1;
        } else {
            i -= 1;
        }

        if diag == left || diag == down || left == down {
            ties += 1;
        }

        steps.push(WarpStep::new(i - 1, j - 1));
    }

    steps.reverse();
    debug!(path_len = steps.len(), ties, "warp path reconstructed");
    (WarpPath(steps), ties)
}
