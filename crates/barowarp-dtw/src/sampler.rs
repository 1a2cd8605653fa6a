//! Sparse correspondence selection along a warp path.

use tracing::{debug, instrument};

use crate::error::{ConfigError, DtwError};
use crate::path::{WarpPath, WarpStep};
use crate::series::{Sample, SeriesView};

/// Which series drives the sampling indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The first series.
    First,
    /// The second series.
    Second,
}

impl Reference {
    /// Pick the series with the earlier final timestamp. Ties go to the first series.
    #[must_use]
    pub fn select(a: SeriesView<'_>, b: SeriesView<'_>) -> Self {
        if b.last().timestamp < a.last().timestamp {
            Self::Second
        } else {
            Self::First
        }
    }

    /// Index of `step` on the reference side.
    #[must_use]
    pub fn index_of(self, step: &WarpStep) -> usize {
        match self {
            Self::First => step.a,
            Self::Second => step.b,
        }
    }
}

/// One aligned pair of samples selected for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    /// Reference-series index this pair was selected for.
    pub reference_index: usize,
    /// Sample from the first series, with the height offset already applied.
    pub first: Sample,
    /// Sample from the second series, unmodified.
    pub second: Sample,
}

/// Ordered correspondences, increasing in reference index.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrespondenceSet {
    reference: Reference,
    items: Vec<Correspondence>,
}

impl CorrespondenceSet {
    /// Series whose indices drove the selection.
    #[must_use]
    pub fn reference(&self) -> Reference {
        self.reference
    }

    /// Return the correspondences as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Correspondence] {
        &self.items
    }

    /// Return the number of correspondences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return true if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the correspondences in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Correspondence> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a CorrespondenceSet {
    type Item = &'a Correspondence;
    type IntoIter = std::slice::Iter<'a, Correspondence>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Configuration for correspondence sampling.
///
/// Construct via [`SamplerConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter | Default |
/// |---|---|
/// | `height_offset` | 0.0 |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    spacing: usize,
    height_offset: f64,
}

impl SamplerConfig {
    /// Create a sampler that emits one correspondence every `spacing`
    /// reference samples.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpacing`] if `spacing` is zero.
    pub fn new(spacing: usize) -> Result<Self, ConfigError> {
        if spacing == 0 {
            return Err(ConfigError::InvalidSpacing { value: 0 });
        }
        Ok(Self {
            spacing,
            height_offset: 0.0,
        })
    }

    /// Like [`SamplerConfig::new`] but accepts a signed spacing from user input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpacing`] if `spacing < 1`.
    pub fn from_signed(spacing: i64) -> Result<Self, ConfigError> {
        match usize::try_from(spacing) {
            Ok(s) if s > 0 => Self::new(s),
            _ => Err(ConfigError::InvalidSpacing { value: spacing }),
        }
    }

    /// Set the offset added to every first-series value.
    #[must_use]
    pub fn with_height_offset(mut self, height_offset: f64) -> Self {
        self.height_offset = height_offset;
        self
    }

    /// Return the sample spacing.
    #[must_use]
    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Return the height offset.
    #[must_use]
    pub fn height_offset(&self) -> f64 {
        self.height_offset
    }

    /// Select correspondences at reference indices `0, spacing, 2 * spacing, ...`.
    ///
    /// For each index a cursor moves forward along `path` to the first step
    /// whose reference-side index matches. The cursor never rewinds, so the
    /// scan is linear in the path length.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::PathMismatch`] | `path` is empty, or a step indexes past either series |
    /// | [`DtwError::MissingCorrespondence`] | No later step has the requested reference index |
    #[instrument(skip_all, fields(spacing = self.spacing, path_len = path.len()))]
    pub fn sample(
        &self,
        path: &WarpPath,
        a: SeriesView<'_>,
        b: SeriesView<'_>,
    ) -> Result<CorrespondenceSet, DtwError> {
        let steps = path.steps();
        let mismatch = |step: &WarpStep| DtwError::PathMismatch {
            a: step.a,
            b: step.b,
            n1: a.len(),
            n2: b.len(),
        };
        let last = steps.last().ok_or(DtwError::PathMismatch {
            a: 0,
            b: 0,
            n1: a.len(),
            n2: b.len(),
        })?;
        if last.a + 1 != a.len() || last.b + 1 != b.len() {
            return Err(mismatch(last));
        }

        let reference = Reference::select(a, b);
        let reference_len = match reference {
            Reference::First => a.len(),
            Reference::Second => b.len(),
        };

        let mut items = Vec::with_capacity(reference_len.div_ceil(self.spacing));
        let mut cursor = 0usize;
        for reference_index in (0..reference_len).step_by(self.spacing) {
            while steps
                .get(cursor)
                .is_some_and(|step| reference.index_of(step) != reference_index)
            {
                cursor += 1;
            }
            let step = steps
                .get(cursor)
                .ok_or(DtwError::MissingCorrespondence { reference_index })?;

            let first = a.get(step.a).ok_or_else(|| mismatch(step))?;
            let second = b.get(step.b).ok_or_else(|| mismatch(step))?;
            items.push(Correspondence {
                reference_index,
                first: Sample::new(first.timestamp, first.value + self.height_offset),
                second: *second,
            });
        }

        debug!(?reference, n_correspondences = items.len(), "correspondences sampled");
        Ok(CorrespondenceSet { reference, items })
    }
}
