//! CSV curve reader with full input validation.

use std::io::Read;
use std::path::{Path, PathBuf};

use barowarp_dtw::{Sample, Series};
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads one `(timestamp, value)` curve from a CSV file.
///
/// Expected CSV format:
/// - No header row
/// - `timestamp_ms,value` per line, extra columns ignored
/// - Lines whose first field starts with `#` are comments
/// - Blank lines are skipped, whitespace around fields is trimmed
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingField`] | Data line has fewer than two fields |
/// | [`IoError::InvalidNumber`] | Timestamp or value is not a number |
/// | [`IoError::InvalidSeries`] | No data lines, non-finite sample, or decreasing timestamps |
pub struct SeriesReader {
    path: PathBuf,
}

impl SeriesReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Series`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Series, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        Self::read_from(file, &self.path)
    }

    /// Parse a curve from any reader. `label` names the source in errors.
    pub fn read_from<R: Read>(reader: R, label: &Path) -> Result<Series, IoError> {
        // Quoting is off so stray quotes in comment lines cannot swallow data lines.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: label.to_path_buf(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;
            let line = record.position().map_or(0, |p| p.line());

            let first = record.get(0).unwrap_or("");
            if first.starts_with('#') || record.iter().all(str::is_empty) {
                skipped += 1;
                continue;
            }
            if record.len() < 2 {
                return Err(IoError::MissingField {
                    path: label.to_path_buf(),
                    line,
                    got: record.len(),
                });
            }

            let parse = |column: usize| -> Result<f64, IoError> {
                let raw = record.get(column).unwrap_or("");
                raw.parse().map_err(|_| IoError::InvalidNumber {
                    path: label.to_path_buf(),
                    line,
                    column,
                    raw: raw.to_string(),
                })
            };
            samples.push(Sample::new(parse(0)?, parse(1)?));
        }
        debug!(skipped, "comment and blank lines skipped");

        let series = Series::new(samples).map_err(|e| IoError::InvalidSeries {
            path: label.to_path_buf(),
            source: e,
        })?;

        info!(
            n_samples = series.len(),
            duration_ms = series.duration_ms(),
            "curve loaded"
        );
        Ok(series)
    }
}
