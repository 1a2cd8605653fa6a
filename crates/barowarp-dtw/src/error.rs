//! Error types for series validation, alignment, and sampling configuration.

/// Input errors from series validation, DTW alignment, and correspondence sampling.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty sample list is provided as a series.
    #[error("series must be non-empty")]
    EmptySeries,

    /// Returned when a timestamp or value is NaN, infinity, or negative infinity.
    #[error("series contains non-finite sample at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite sample found.
        index: usize,
    },

    /// Returned when a timestamp is smaller than the one before it.
    #[error("timestamp at index {index} decreases ({previous} -> {current})")]
    NonMonotonicTimestamp {
        /// Position of the offending sample.
        index: usize,
        /// Timestamp of the preceding sample.
        previous: f64,
        /// Timestamp of the offending sample.
        current: f64,
    },

    /// Returned when the sampler cursor runs off the warp path before finding
    /// a step for the requested reference index.
    #[error("no warp path step maps reference index {reference_index}")]
    MissingCorrespondence {
        /// Reference-series index that had no matching step.
        reference_index: usize,
    },

    /// Returned when a warp path does not span the series it is sampled against.
    #[error("warp path ends at ({a}, {b}) but series lengths are ({n1}, {n2})")]
    PathMismatch {
        /// Last first-series index on the path.
        a: usize,
        /// Last second-series index on the path.
        b: usize,
        /// Length of the first series.
        n1: usize,
        /// Length of the second series.
        n2: usize,
    },
}

/// Errors from invalid user-supplied parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a negative warp window half-width is requested.
    #[error("band width must be non-negative, got {value}")]
    NegativeBandWidth {
        /// The rejected value.
        value: i64,
    },

    /// Returned when the sample spacing is zero or negative.
    #[error("sample spacing must be at least 1, got {value}")]
    InvalidSpacing {
        /// The rejected value.
        value: i64,
    },

    /// Returned when a cost model threshold is negative or not finite.
    #[error("cost threshold {name} must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Either kind of failure, for entry points that validate configuration and input together.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Wraps an input error.
    #[error(transparent)]
    Input(#[from] DtwError),

    /// Wraps a configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
