//! Sample and series types with validation guarantees.

use std::ops::Index;

use crate::error::DtwError;

/// One `(timestamp, value)` reading. Timestamps are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Milliseconds since an arbitrary origin.
    pub timestamp: f64,
    /// Measured value, e.g. barometric height in metres.
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    #[must_use]
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Owned, validated series of samples.
///
/// Guaranteed non-empty, with finite timestamps and values and
/// non-decreasing timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(Vec<Sample>);

impl Series {
    /// Create a new series, validating every sample.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `samples` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any timestamp or value is NaN or infinite |
    /// | [`DtwError::NonMonotonicTimestamp`] | A timestamp is smaller than its predecessor |
    pub fn new(samples: Vec<Sample>) -> Result<Self, DtwError> {
        validate(&samples)?;
        Ok(Self(samples))
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SeriesView<'_> {
        SeriesView::new_unchecked(&self.0)
    }

    /// Build a series from `(timestamp, value)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Series::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DtwError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(|(t, v)| Sample::new(t, v)).collect())
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the series has no samples.
    ///
    /// Always `false` for a series built through [`Series::new`]. Provided to
    /// satisfy the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the samples as a slice.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    /// Return the sample at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.0.get(index)
    }

    /// Return the first sample.
    #[must_use]
    pub fn first(&self) -> &Sample {
        &self.0[0]
    }

    /// Return the last sample.
    #[must_use]
    pub fn last(&self) -> &Sample {
        &self.0[self.0.len() - 1]
    }

    /// Iterate over the sample values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|s| s.value)
    }

    /// Time spanned between the first and last sample, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.last().timestamp - self.first().timestamp
    }

    /// Return a copy whose timestamps are shifted so the first sample sits at zero.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::NonFiniteValue`] if a shifted timestamp overflows,
    /// which needs timestamps near `f64::MAX` on both sides of the origin.
    pub fn rebased(&self) -> Result<Self, DtwError> {
        let origin = self.first().timestamp;
        Self::new(
            self.0
                .iter()
                .map(|s| Sample::new(s.timestamp - origin, s.value))
                .collect(),
        )
    }
}

impl Index<usize> for Series {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Index of the candidate spanning the shortest time, the ground truth
/// other recordings of the same trip are aligned against.
///
/// Ties go to the earliest candidate. Returns `None` for an empty slice.
#[must_use]
pub fn ground_truth(candidates: &[Series]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| x.duration_ms().total_cmp(&y.duration_ms()))
        .map(|(index, _)| index)
}

/// Check the series invariants: non-empty, finite, non-decreasing timestamps.
fn validate(samples: &[Sample]) -> Result<(), DtwError> {
    if samples.is_empty() {
        return Err(DtwError::EmptySeries);
    }
    if let Some(index) = samples
        .iter()
        .position(|s| !s.timestamp.is_finite() || !s.value.is_finite())
    {
        return Err(DtwError::NonFiniteValue { index });
    }
    if let Some(index) = samples
        .windows(2)
        .position(|w| w[1].timestamp < w[0].timestamp)
    {
        return Err(DtwError::NonMonotonicTimestamp {
            index: index + 1,
            previous: samples[index].timestamp,
            current: samples[index + 1].timestamp,
        });
    }
    Ok(())
}

/// Borrowed, validated view into a series. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a>(&'a [Sample]);

impl<'a> SeriesView<'a> {
    /// Create a new view, validating the slice the same way as [`Series::new`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `slice` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any timestamp or value is NaN or infinite |
    /// | [`DtwError::NonMonotonicTimestamp`] | A timestamp is smaller than its predecessor |
    pub fn new(slice: &'a [Sample]) -> Result<Self, DtwError> {
        validate(slice)?;
        Ok(Self(slice))
    }

    pub(crate) fn new_unchecked(slice: &'a [Sample]) -> Self {
        Self(slice)
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the view has no samples. Always `false` for a validated view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the sample at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Sample> {
        self.0.get(index)
    }

    /// Return the last sample.
    #[must_use]
    pub fn last(&self) -> &'a Sample {
        &self.0[self.0.len() - 1]
    }
}

impl Index<usize> for SeriesView<'_> {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
