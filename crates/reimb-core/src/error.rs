//! Error types for the reimb-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the reimb library.
#[derive(Error, Debug)]
pub enum ReimbError {
    /// Directory scan error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Report generation error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reasons a filename does not yield an invoice record.
///
/// None of these are fatal: the caller skips the file and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The filename has no `.` separator at all.
    #[error("filename has no extension")]
    MissingExtension,

    /// The extension is not the invoice extension.
    #[error("unsupported extension: {0}")]
    UnsupportedExtension(String),

    /// The stem does not follow `YYYY-MM-DD-buyer-amount-number`.
    #[error("filename does not match the invoice naming pattern")]
    Grammar,

    /// Year, month and day do not form a calendar date.
    #[error("invalid date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The amount could not be parsed as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl ParseError {
    /// Whether the filename simply is not an invoice name, as opposed to
    /// matching the pattern but carrying an impossible value.
    pub fn is_non_match(&self) -> bool {
        matches!(
            self,
            ParseError::MissingExtension | ParseError::UnsupportedExtension(_) | ParseError::Grammar
        )
    }
}

/// Errors related to reading the invoice directory.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The directory could not be listed.
    #[error("cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to writing reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The layout template is unusable.
    #[error("invalid template: {0}")]
    Template(String),
}

/// Result type for the reimb library.
pub type Result<T> = std::result::Result<T, ReimbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_match_classification() {
        assert!(ParseError::MissingExtension.is_non_match());
        assert!(ParseError::UnsupportedExtension("txt".to_string()).is_non_match());
        assert!(ParseError::Grammar.is_non_match());
        assert!(!ParseError::InvalidDate { year: 2023, month: 2, day: 30 }.is_non_match());
        assert!(!ParseError::InvalidAmount("1_2_3".to_string()).is_non_match());
    }

    #[test]
    fn test_invalid_date_message() {
        let err = ParseError::InvalidDate { year: 2023, month: 13, day: 1 };
        assert_eq!(err.to_string(), "invalid date: 2023-13-1");
    }
}
