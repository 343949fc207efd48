//! Core library for invoice reimbursement reconciliation.
//!
//! This crate provides:
//! - Invoice filename parsing (`YYYY-MM-DD-buyer-amount-number.pdf`)
//! - Screenshot association against a directory listing
//! - The invoice record model with its derived validity
//! - CSV summary and LaTeX layout report generators

pub mod error;
pub mod models;
pub mod invoice;
pub mod pipeline;
pub mod report;

pub use error::{ParseError, ReimbError, Result};
pub use models::config::ReimbConfig;
pub use models::invoice::{InvoiceRecord, MISSING_SCREENSHOT};
pub use invoice::{DirectoryListing, FilenameParser, SiblingFiles, Validator};
pub use pipeline::{process_directory, ProcessOutcome, SkippedFile};
pub use report::{CsvSummaryGenerator, LatexLayoutGenerator, ReportGenerator, ReportStatus};
