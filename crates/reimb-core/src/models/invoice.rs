//! Invoice record built from an invoice filename.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Validation error recorded when no screenshot accompanies an invoice.
pub const MISSING_SCREENSHOT: &str = "missing corresponding screenshot file";

/// A single invoice, as described by its filename, together with the
/// screenshots found next to it.
///
/// Validity is never stored: it is derived from the association list, which
/// can only be replaced through [`InvoiceRecord::with_screenshots`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    /// Date the invoice was issued.
    pub invoice_date: NaiveDate,

    /// Invoice number, kept as text (leading zeros matter).
    pub invoice_number: String,

    /// Invoice amount.
    pub amount: Decimal,

    /// Purchaser the invoice is reimbursed to.
    pub buyer: String,

    /// Source filename, including the extension.
    pub original_filename: String,

    screenshot_filenames: Vec<String>,
    validation_errors: Vec<String>,
}

impl InvoiceRecord {
    /// Create a record with no associated screenshots yet.
    pub fn new(
        invoice_date: NaiveDate,
        invoice_number: impl Into<String>,
        amount: Decimal,
        buyer: impl Into<String>,
        original_filename: impl Into<String>,
    ) -> Self {
        Self {
            invoice_date,
            invoice_number: invoice_number.into(),
            amount,
            buyer: buyer.into(),
            original_filename: original_filename.into(),
            screenshot_filenames: Vec::new(),
            validation_errors: Vec::new(),
        }
    }

    /// Replace the association list and recompute the validation errors
    /// from it.
    pub fn with_screenshots(mut self, screenshots: Vec<String>) -> Self {
        self.validation_errors = if screenshots.is_empty() {
            vec![MISSING_SCREENSHOT.to_string()]
        } else {
            Vec::new()
        };
        self.screenshot_filenames = screenshots;
        self
    }

    /// Associated screenshot filenames, in discovery order.
    pub fn screenshot_filenames(&self) -> &[String] {
        &self.screenshot_filenames
    }

    /// Reasons the invoice failed validation.
    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    /// An invoice is valid once at least one screenshot is associated.
    pub fn is_valid(&self) -> bool {
        !self.screenshot_filenames.is_empty()
    }

    /// Number of associated screenshots.
    pub fn screenshot_count(&self) -> usize {
        self.screenshot_filenames.len()
    }

    /// The original filename without its extension.
    pub fn basename(&self) -> &str {
        strip_extension(&self.original_filename)
    }
}

/// Remove everything from the last `.` on, if there is one.
pub(crate) fn strip_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename)
}

impl Serialize for InvoiceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InvoiceRecord", 8)?;
        state.serialize_field("invoice_date", &self.invoice_date)?;
        state.serialize_field("invoice_number", &self.invoice_number)?;
        state.serialize_field("amount", &self.amount)?;
        state.serialize_field("buyer", &self.buyer)?;
        state.serialize_field("original_filename", &self.original_filename)?;
        state.serialize_field("screenshot_filenames", &self.screenshot_filenames)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("validation_errors", &self.validation_errors)?;
        state.end()
    }
}
