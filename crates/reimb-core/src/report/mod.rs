//! Report generation from finalized invoice records.

mod layout;
mod summary;

pub use layout::{LatexLayoutGenerator, PAGES_PLACEHOLDER};
pub use summary::CsvSummaryGenerator;

use std::path::PathBuf;

use crate::error::ReportError;
use crate::models::invoice::InvoiceRecord;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// What a generator did with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The report was written to this path.
    Written(PathBuf),
    /// There was nothing to report, no file was written.
    Skipped,
}

/// Trait for report renderers. Records are read-only here: validity and the
/// association list are taken as given.
pub trait ReportGenerator {
    /// Render the records into the generator's output.
    fn generate(&self, records: &[InvoiceRecord]) -> Result<ReportStatus>;
}
