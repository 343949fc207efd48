//! Directory reconciliation: parse every invoice filename, associate its
//! screenshots and collect the results.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use crate::error::{ParseError, Result};
use crate::invoice::{DirectoryListing, FilenameParser, Validator};
use crate::models::invoice::InvoiceRecord;

/// A file that carried the invoice extension but did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: ParseError,
}

/// Everything a directory run produced.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    /// Validated records, valid and invalid, in filename order.
    pub records: Vec<InvoiceRecord>,
    /// Invoice-extension files whose names did not parse.
    pub skipped: Vec<SkippedFile>,
}

impl ProcessOutcome {
    pub fn valid(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.records.iter().filter(|r| r.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.records.iter().filter(|r| !r.is_valid())
    }

    /// Sum of the amounts of valid invoices.
    pub fn total_valid_amount(&self) -> Decimal {
        self.valid().map(|r| r.amount).sum()
    }
}

/// Reconcile every invoice in `dir`.
///
/// Fails only when the directory itself cannot be listed; malformed names
/// end up in [`ProcessOutcome::skipped`] and invoices without screenshots are
/// kept as invalid records.
pub fn process_directory(
    dir: &Path,
    parser: &FilenameParser,
    validator: &Validator,
) -> Result<ProcessOutcome> {
    let listing = DirectoryListing::read(dir)?;
    let outcome = process_listing(&listing, parser, validator);

    info!(
        "{}: {} invoice(s), {} valid, {} skipped",
        dir.display(),
        outcome.records.len(),
        outcome.valid().count(),
        outcome.skipped.len()
    );

    Ok(outcome)
}

/// Reconcile an already-read listing.
pub fn process_listing(
    listing: &DirectoryListing,
    parser: &FilenameParser,
    validator: &Validator,
) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::default();

    for filename in listing.filenames() {
        if !parser.has_invoice_extension(filename) {
            trace!("ignoring {}", filename);
            continue;
        }

        match parser.parse(filename) {
            Ok(record) => {
                debug!("validating {}", filename);
                outcome.records.push(validator.validate(record, listing));
            }
            Err(reason) => {
                if reason.is_non_match() {
                    warn!("'{}' is not an invoice name ({}), skipping", filename, reason);
                } else {
                    warn!("'{}' names an impossible invoice ({}), skipping", filename, reason);
                }
                outcome.skipped.push(SkippedFile {
                    filename: filename.to_string(),
                    reason,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReimbError;
    use crate::models::invoice::MISSING_SCREENSHOT;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2023-10-23-abc-50_0-1.pdf");
        touch(dir.path(), "2023-10-23-abc-50_0-1.png");
        touch(dir.path(), "2023-10-24-def-75_5-2.pdf");
        touch(dir.path(), "2023-10-24-def-75_5-2-1.jpg");
        touch(dir.path(), "2023-10-24-def-75_5-2-2.png");
        touch(dir.path(), "2023-10-25-ghi-10-3.pdf");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "random.pdf");
        touch(dir.path(), "2023-02-30-abc-1-4.pdf");

        let outcome =
            process_directory(dir.path(), &FilenameParser::new(), &Validator::new()).unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.valid().count(), 2);

        let invalid: Vec<_> = outcome.invalid().collect();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].original_filename, "2023-10-25-ghi-10-3.pdf");
        assert_eq!(invalid[0].validation_errors(), &[MISSING_SCREENSHOT.to_string()]);

        let multi = &outcome.records[1];
        assert_eq!(
            multi.screenshot_filenames(),
            &[
                "2023-10-24-def-75_5-2-1.jpg".to_string(),
                "2023-10-24-def-75_5-2-2.png".to_string(),
            ]
        );

        assert_eq!(outcome.total_valid_amount(), Decimal::new(1255, 1));

        let skipped: Vec<_> = outcome.skipped.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(skipped, vec!["2023-02-30-abc-1-4.pdf", "random.pdf"]);
        assert_eq!(
            outcome.skipped[0].reason,
            ParseError::InvalidDate { year: 2023, month: 2, day: 30 }
        );
        assert!(!outcome.skipped[0].reason.is_non_match());
        assert!(outcome.skipped[1].reason.is_non_match());
    }

    #[test]
    fn test_process_listing_in_memory() {
        let listing = DirectoryListing::from_names(
            "inbox",
            ["2024-1-2-zed-3_25-77.pdf", "2024-1-2-zed-3_25-77.jpeg"],
        );

        let outcome = process_listing(&listing, &FilenameParser::new(), &Validator::new());

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].is_valid());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_unreadable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_directory(
            &dir.path().join("missing"),
            &FilenameParser::new(),
            &Validator::new(),
        );
        assert!(matches!(result, Err(ReimbError::Scan(_))));
    }
}
