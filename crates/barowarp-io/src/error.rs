//! I/O error types for barowarp-io.

use std::path::PathBuf;

use barowarp_dtw::DtwError;

/// Errors from curve loading, template parsing, formatting, and output.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when an open stream fails mid-read.
    #[error("failed reading {path}")]
    Read {
        /// Path or label of the stream.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a data line has fewer than two fields.
    #[error("line {line} of {path} has {got} field(s), expected timestamp and value")]
    MissingField {
        /// Path to the CSV file.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// Number of fields found.
        got: usize,
    },

    /// Returned when a timestamp or value field is not a number.
    #[error("invalid number \"{raw}\" in {path}: line {line}, column {column}")]
    InvalidNumber {
        /// Path to the CSV file.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// Zero-based field index (0 = timestamp, 1 = value).
        column: usize,
        /// The raw text that failed to parse.
        raw: String,
    },

    /// Returned when the parsed samples do not form a valid series.
    #[error("invalid series in {path}")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Validation failure.
        source: DtwError,
    },

    /// Returned when a template fragment cannot be formatted with its arguments.
    #[error("cannot format \"{format}\": {reason}")]
    Format {
        /// The offending format string.
        format: String,
        /// What went wrong.
        reason: String,
    },

    /// Returned when the rendered script cannot be written.
    #[error("cannot write output")]
    WriteOutput {
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
