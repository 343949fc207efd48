//! Invoice filename parser.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::ParseError;
use crate::models::invoice::InvoiceRecord;

use super::patterns::INVOICE_STEM;
use super::Result;

/// Parses `YYYY-MM-DD-<buyer>-<amount>-<invoice_number>.pdf` filenames into
/// invoice records.
#[derive(Debug, Clone)]
pub struct FilenameParser {
    /// Extension (without the dot) an invoice file must carry.
    extension: String,
}

impl FilenameParser {
    /// Create a parser accepting `.pdf` invoices.
    pub fn new() -> Self {
        Self {
            extension: "pdf".to_string(),
        }
    }

    /// Set the accepted invoice extension (case-sensitive, without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Whether a filename carries the invoice extension. Cheap pre-filter for
    /// directory scans; does not check the naming pattern.
    pub fn has_invoice_extension(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == self.extension)
    }

    /// Parse a filename (with extension) into a fresh, not yet validated
    /// record.
    pub fn parse(&self, filename: &str) -> Result<InvoiceRecord> {
        let (stem, extension) = filename
            .rsplit_once('.')
            .ok_or(ParseError::MissingExtension)?;

        if extension != self.extension {
            return Err(ParseError::UnsupportedExtension(extension.to_string()));
        }

        let caps = INVOICE_STEM.captures(stem).ok_or(ParseError::Grammar)?;

        // The pattern bounds these to at most 4 and 2 digits
        let year: i32 = caps["year"].parse().map_err(|_| ParseError::Grammar)?;
        let month: u32 = caps["month"].parse().map_err(|_| ParseError::Grammar)?;
        let day: u32 = caps["day"].parse().map_err(|_| ParseError::Grammar)?;

        // Calendar years start at 1, chrono alone would accept year 0
        let invoice_date = Some(year)
            .filter(|year| *year >= 1)
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or(ParseError::InvalidDate { year, month, day })?;

        let amount = parse_amount(&caps["amount"])?;

        debug!(filename, %invoice_date, %amount, "parsed invoice filename");

        Ok(InvoiceRecord::new(
            invoice_date,
            &caps["invoice_number"],
            amount,
            &caps["buyer"],
            filename,
        ))
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a filename amount, where `_` stands for the decimal point.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let normalized = raw.replace('_', ".");
    Decimal::from_str(&normalized).map_err(|_| ParseError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid_filename() {
        let parser = FilenameParser::new();
        let filename = "2023-10-15-abc-19_9-12345678901234567890.pdf";

        let record = parser.parse(filename).unwrap();

        assert_eq!(record.invoice_date, NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
        assert_eq!(record.invoice_number, "12345678901234567890");
        assert_eq!(record.amount, Decimal::new(199, 1));
        assert_eq!(record.buyer, "abc");
        assert_eq!(record.original_filename, filename);
        assert!(record.screenshot_filenames().is_empty());
        assert!(record.validation_errors().is_empty());
        assert!(!record.is_valid());
    }

    #[test]
    fn test_parse_single_digit_month_and_day() {
        let parser = FilenameParser::new();

        let record = parser.parse("2023-1-5-abc-19_9-1.pdf").unwrap();
        assert_eq!(record.invoice_date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());

        let record = parser.parse("2023-01-05-abc-19_9-1.pdf").unwrap();
        assert_eq!(record.invoice_date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_keeps_leading_zeros_in_number() {
        let record = FilenameParser::new()
            .parse("2024-02-29-xyz-7-0000420.pdf")
            .unwrap();
        assert_eq!(record.invoice_number, "0000420");
        assert_eq!(record.invoice_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_amount("50").unwrap(), Decimal::new(50, 0));
        assert_eq!(parse_amount("19_9").unwrap(), Decimal::new(199, 1));
        assert_eq!(parse_amount("0_05").unwrap(), Decimal::new(5, 2));

        let record = FilenameParser::new().parse("2023-10-15-abc-50-1.pdf").unwrap();
        assert_eq!(record.amount, Decimal::new(50, 0));
    }

    #[test]
    fn test_parse_literal_dot_amount_is_rejected() {
        let result = FilenameParser::new().parse("2023-10-15-abc-19.9-123.pdf");
        assert_eq!(result, Err(ParseError::Grammar));
    }

    #[test]
    fn test_parse_invalid_filenames() {
        let parser = FilenameParser::new();
        let invalid = [
            "23-10-15-abc-19_9-12345678901234567890.pdf",
            "2023_10_15-abc-19_9-12345678901234567890.pdf",
            "2023-10-15-19_9-12345678901234567890.pdf",
            "2023-10-15-abc-12345678901234567890.pdf",
            "2023-10-15-abc-19_9.pdf",
            "2023-10-15-abc-19.9-12345678901234567890.pdf",
            "2023-10-15-abc-19_9-12345678901234567890.txt",
            "2023-10-15-abc-19_9-12345678901234567890.PDF",
            "just_a_random_string.pdf",
            "2023-10-15-abc-19_9-12345678901234567890",
            "2023-100-15-abc-19_9-1.pdf",
            "2023-10-15-ab1-19_9-1.pdf",
            "2023-10-15-ab_c-19_9-1.pdf",
            "2023-10-15-Abc-19_9-1.pdf",
            "2023-10-15-abc-19_-1.pdf",
            "2023-10-15-abc-19_9-1x.pdf",
            " 2023-10-15-abc-19_9-1.pdf",
        ];

        for filename in invalid {
            assert!(parser.parse(filename).is_err(), "expected failure for {filename}");
        }
    }

    #[test]
    fn test_parse_error_kinds() {
        let parser = FilenameParser::new();

        assert_eq!(
            parser.parse("2023-10-15-abc-19_9-1"),
            Err(ParseError::MissingExtension)
        );
        assert_eq!(
            parser.parse("2023-10-15-abc-19_9-1.txt"),
            Err(ParseError::UnsupportedExtension("txt".to_string()))
        );
        assert_eq!(
            parser.parse("2023-02-30-abc-19_9-1.pdf"),
            Err(ParseError::InvalidDate { year: 2023, month: 2, day: 30 })
        );
        assert_eq!(
            parser.parse("2023-13-01-abc-19_9-1.pdf"),
            Err(ParseError::InvalidDate { year: 2023, month: 13, day: 1 })
        );
        assert_eq!(
            parser.parse("2023-10-32-abc-19_9-1.pdf"),
            Err(ParseError::InvalidDate { year: 2023, month: 10, day: 32 })
        );
        assert_eq!(
            parser.parse("0000-01-01-abc-1-1.pdf"),
            Err(ParseError::InvalidDate { year: 0, month: 1, day: 1 })
        );
    }

    #[test]
    fn test_parse_first_calendar_year() {
        let record = FilenameParser::new().parse("0001-01-01-abc-1-1.pdf").unwrap();
        assert_eq!(record.invoice_date, NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_amount_overflow_is_semantic_failure() {
        let huge = "9".repeat(40);
        let filename = format!("2023-10-15-abc-{huge}-1.pdf");
        assert_eq!(
            FilenameParser::new().parse(&filename),
            Err(ParseError::InvalidAmount(huge))
        );
    }

    #[test]
    fn test_custom_extension() {
        let parser = FilenameParser::new().with_extension("PDF");
        assert!(parser.parse("2023-10-15-abc-1-1.PDF").is_ok());
        assert!(parser.parse("2023-10-15-abc-1-1.pdf").is_err());
        assert!(parser.has_invoice_extension("a.PDF"));
        assert!(!parser.has_invoice_extension("a.pdf"));
    }
}
