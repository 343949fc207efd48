//! CSV summary of valid invoices.

use std::path::PathBuf;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::models::invoice::InvoiceRecord;

use super::{ReportGenerator, ReportStatus, Result};

const HEADER: [&str; 9] = [
    "date",
    "amount",
    "buyer",
    "invoice_number",
    "invoice_filename",
    "screenshot_filenames",
    "screenshot_count",
    "is_valid",
    "validation_errors",
];

/// Writes one row per valid invoice followed by a total row.
#[derive(Debug, Clone)]
pub struct CsvSummaryGenerator {
    path: PathBuf,
}

impl CsvSummaryGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportGenerator for CsvSummaryGenerator {
    fn generate(&self, records: &[InvoiceRecord]) -> Result<ReportStatus> {
        let valid: Vec<&InvoiceRecord> = records.iter().filter(|r| r.is_valid()).collect();
        if valid.is_empty() {
            warn!("no valid invoices, not writing {}", self.path.display());
            return Ok(ReportStatus::Skipped);
        }

        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(HEADER)?;

        let mut total = Decimal::ZERO;
        for record in &valid {
            total += record.amount;
            wtr.write_record([
                record.invoice_date.to_string(),
                record.amount.to_string(),
                record.buyer.clone(),
                record.invoice_number.clone(),
                record.original_filename.clone(),
                record.screenshot_filenames().join(";"),
                record.screenshot_count().to_string(),
                record.is_valid().to_string(),
                record.validation_errors().join("; "),
            ])?;
        }

        wtr.write_record(["total", &total.to_string(), "", "", "", "", "", "", ""])?;
        wtr.flush().map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "wrote {} invoice(s), total {}, to {}",
            valid.len(),
            total,
            self.path.display()
        );

        Ok(ReportStatus::Written(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(
        day: u32,
        amount: Decimal,
        buyer: &str,
        number: &str,
        screenshots: &[&str],
    ) -> InvoiceRecord {
        let encoded = amount.to_string().replace('.', "_");
        let filename = format!("2023-10-{day}-{buyer}-{encoded}-{number}.pdf");
        InvoiceRecord::new(
            NaiveDate::from_ymd_opt(2023, 10, day).unwrap(),
            number,
            amount,
            buyer,
            filename,
        )
        .with_screenshots(screenshots.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_writes_valid_rows_and_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.csv");

        let records = vec![
            record(23, Decimal::new(500, 1), "abc", "12345678901234567890", &["a.png"]),
            record(
                24,
                Decimal::new(755, 1),
                "def",
                "09876543210987654321",
                &["b-1.jpg", "b-2.png"],
            ),
            record(25, Decimal::new(1000, 1), "ghi", "1", &[]),
            record(2, Decimal::new(705, 1), "main", "09876543290987654321", &["c.jpeg"]),
        ];

        let status = CsvSummaryGenerator::new(&path).generate(&records).unwrap();
        assert_eq!(status, ReportStatus::Written(path.clone()));

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.headers().unwrap().iter().collect::<Vec<_>>(), HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);

        assert_eq!(&rows[0][0], "2023-10-23");
        assert_eq!(&rows[0][1], "50.0");
        assert_eq!(&rows[0][2], "abc");
        assert_eq!(&rows[0][3], "12345678901234567890");
        assert_eq!(&rows[0][5], "a.png");
        assert_eq!(&rows[0][7], "true");
        assert_eq!(&rows[0][8], "");

        assert_eq!(&rows[1][3], "09876543210987654321");
        assert_eq!(&rows[1][5], "b-1.jpg;b-2.png");
        assert_eq!(&rows[1][6], "2");

        assert_eq!(&rows[3][0], "total");
        assert_eq!(&rows[3][1], "196.0");
    }

    #[test]
    fn test_no_valid_invoices_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.csv");

        let records = vec![record(23, Decimal::new(50, 0), "abc", "1", &[])];

        let status = CsvSummaryGenerator::new(&path).generate(&records).unwrap();

        assert_eq!(status, ReportStatus::Skipped);
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("invoices.csv");
        let records = vec![record(23, Decimal::new(50, 0), "abc", "1", &["a.png"])];

        assert!(CsvSummaryGenerator::new(path).generate(&records).is_err());
    }
}
