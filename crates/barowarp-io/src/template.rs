//! Gnuplot template splitting.
//!
//! A template is plain gnuplot text with three marker lines:
//!
//! ```text
//! <preamble lines>
//! #DTW-ARROW-START
//! <arrow format, applied once per correspondence>
//! #DTW-ARROW-END
//! <plot format>
//! #DTW-END
//! ```
//!
//! Anything after `#DTW-END` is ignored. Missing markers leave the matching
//! fragments empty.

use std::io::BufRead;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::IoError;

const ARROW_START: &str = "#DTW-ARROW-START";
const ARROW_END: &str = "#DTW-ARROW-END";
const END: &str = "#DTW-END";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Arrow,
    Plot,
}

/// The three fragments of a split template. Every stored line ends in `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    preamble: String,
    arrow: String,
    plot: String,
}

impl Template {
    /// Split a template read line by line from `input`.
    ///
    /// Lines are trimmed before they are compared against the markers and
    /// before they are stored.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Read`] if `input` fails.
    #[instrument(skip(input))]
    pub fn parse<R: BufRead>(input: R) -> Result<Self, IoError> {
        let mut template = Self::default();
        let mut section = Section::Preamble;

        for line in input.lines() {
            let line = line.map_err(|e| IoError::Read {
                path: PathBuf::from("<template>"),
                source: e,
            })?;
            let line = line.trim();
            match line {
                END => break,
                ARROW_START => {
                    section = Section::Arrow;
                    continue;
                }
                ARROW_END => {
                    section = Section::Plot;
                    continue;
                }
                _ => {}
            }

            let target = match section {
                Section::Preamble => &mut template.preamble,
                Section::Arrow => &mut template.arrow,
                Section::Plot => &mut template.plot,
            };
            target.push_str(line);
            target.push('\n');
        }

        debug!(
            preamble_bytes = template.preamble.len(),
            arrow_bytes = template.arrow.len(),
            plot_bytes = template.plot.len(),
            "template split"
        );
        Ok(template)
    }

    /// Text emitted verbatim before anything else.
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Format applied to every correspondence.
    #[must_use]
    pub fn arrow(&self) -> &str {
        &self.arrow
    }

    /// Format applied once with the output and source names.
    #[must_use]
    pub fn plot(&self) -> &str {
        &self.plot
    }
}
