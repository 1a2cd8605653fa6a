//! Banded DTW alignment of two sampled curves.
//!
//! Pure math library, zero I/O. Provides the three-regime local cost model,
//! the Sakoe-Chiba constrained cost matrix, warp path reconstruction with a
//! fixed tie-break order, and sparse correspondence sampling for display.

mod constraint;
mod cost;
mod distance;
mod dtw;
mod error;
mod matrix;
mod path;
mod sampler;
mod series;

pub use constraint::BandConstraint;
pub use cost::{CostModel, DEFAULT_ALLOWED_ERROR, DEFAULT_SENSOR_NOISE};
pub use distance::AlignmentCost;
pub use dtw::{Alignment, Dtw};
pub use error::{AlignError, ConfigError, DtwError};
pub use matrix::CostMatrix;
pub use path::{WarpPath, WarpStep};
pub use sampler::{Correspondence, CorrespondenceSet, Reference, SamplerConfig};
pub use series::{Sample, Series, SeriesView, ground_truth};

/// Align two sample sequences with a band half-width of at least `band_width`.
///
/// # Errors
///
/// Returns a [`DtwError`] if either sequence is empty, holds a non-finite
/// sample, or has decreasing timestamps.
pub fn compute_warp(
    series1: &[Sample],
    series2: &[Sample],
    band_width: usize,
) -> Result<Alignment, DtwError> {
    let a = SeriesView::new(series1)?;
    let b = SeriesView::new(series2)?;
    Ok(Dtw::new(band_width).align(a, b))
}

/// Select display correspondences every `spacing` reference samples.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::Config`] | `spacing` is zero |
/// | [`AlignError::Input`] | Invalid series, or `warp_path` does not fit them |
pub fn sample_correspondences(
    warp_path: &WarpPath,
    series1: &[Sample],
    series2: &[Sample],
    spacing: usize,
    height_offset: f64,
) -> Result<CorrespondenceSet, AlignError> {
    let config = SamplerConfig::new(spacing)?.with_height_offset(height_offset);
    let a = SeriesView::new(series1)?;
    let b = SeriesView::new(series2)?;
    Ok(config.sample(warp_path, a, b)?)
}
