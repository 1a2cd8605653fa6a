//! Local cost between two aligned values.

use crate::error::ConfigError;

/// Default absolute difference treated as measurement noise.
pub const DEFAULT_SENSOR_NOISE: f64 = 2.0;

/// Default absolute difference above which the cost becomes quadratic.
pub const DEFAULT_ALLOWED_ERROR: f64 = 2.0;

/// Three-regime local cost.
///
/// With `d = |a - b|`:
///
/// | Condition | Cost |
/// |---|---|
/// | `d < sensor_noise` | `0` |
/// | `d > allowed_error` | `d * d` |
/// | otherwise | `d` |
///
/// Both comparisons are strict, so `d == sensor_noise` and `d == allowed_error`
/// land in the linear regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    sensor_noise: f64,
    allowed_error: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            sensor_noise: DEFAULT_SENSOR_NOISE,
            allowed_error: DEFAULT_ALLOWED_ERROR,
        }
    }
}

impl CostModel {
    /// Create a cost model with custom thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] if either threshold is
    /// negative, NaN, or infinite.
    pub fn with_thresholds(sensor_noise: f64, allowed_error: f64) -> Result<Self, ConfigError> {
        for (name, value) in [("sensor_noise", sensor_noise), ("allowed_error", allowed_error)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(Self {
            sensor_noise,
            allowed_error,
        })
    }

    /// Return the noise threshold.
    #[must_use]
    pub fn sensor_noise(&self) -> f64 {
        self.sensor_noise
    }

    /// Return the quadratic-penalty threshold.
    #[must_use]
    pub fn allowed_error(&self) -> f64 {
        self.allowed_error
    }

    /// Local cost of aligning `a` with `b`. Always non-negative.
    #[inline]
    #[must_use]
    pub fn cost(&self, a: f64, b: f64) -> f64 {
        let d = (a - b).abs();
        if d < self.sensor_noise {
            0.0
        } else if d > self.allowed_error {
            d * d
        } else {
            d
        }
    }
}
