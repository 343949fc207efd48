//! Screenshot association for parsed invoices.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::ScanError;
use crate::models::invoice::InvoiceRecord;

/// Default screenshot extensions, in preference order.
pub const DEFAULT_SCREENSHOT_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".jpeg"];

/// Read access to the files sitting next to an invoice.
///
/// This is the only filesystem capability the validator needs, so tests can
/// hand it an in-memory set instead of a real directory.
pub trait SiblingFiles {
    /// Whether a file with exactly this name exists.
    fn contains(&self, name: &str) -> bool;
}

impl SiblingFiles for BTreeSet<String> {
    fn contains(&self, name: &str) -> bool {
        BTreeSet::contains(self, name)
    }
}

impl SiblingFiles for HashSet<String> {
    fn contains(&self, name: &str) -> bool {
        HashSet::contains(self, name)
    }
}

/// Snapshot of the file names in one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    path: PathBuf,
    entries: BTreeSet<String>,
}

impl DirectoryListing {
    /// List a directory. Non UTF-8 names are left out, and so are
    /// subdirectories: a directory named `X.png` never counts as a
    /// screenshot, even though it exists.
    pub fn read(path: &Path) -> Result<Self, ScanError> {
        let unreadable = |source: std::io::Error| ScanError::DirectoryUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let mut entries = BTreeSet::new();
        for entry in fs::read_dir(path).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if entry.file_type().map_err(unreadable)?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => {
                    entries.insert(name);
                }
                Err(name) => trace!("ignoring non UTF-8 file name {:?}", name),
            }
        }

        debug!("listed {} files in {}", entries.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Build a listing from known names, without touching the filesystem.
    pub fn from_names<I, S>(path: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            entries: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Directory the listing was taken from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File names in lexicographic order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SiblingFiles for DirectoryListing {
    fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }
}

/// Associates screenshots with invoices and settles their validity.
#[derive(Debug, Clone)]
pub struct Validator {
    /// Screenshot extensions (with the dot), in preference order.
    extensions: Vec<String>,
}

impl Validator {
    /// Create a validator looking for `.jpg`, `.png` and `.jpeg` screenshots.
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_SCREENSHOT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    /// Set the screenshot extensions, in preference order.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Run the association search for a record and return it finalized.
    ///
    /// Any previous association is discarded, so validating twice against
    /// the same files gives the same record.
    pub fn validate<F>(&self, record: InvoiceRecord, files: &F) -> InvoiceRecord
    where
        F: SiblingFiles + ?Sized,
    {
        let screenshots = self.find_screenshots(record.basename(), files);
        let record = record.with_screenshots(screenshots);

        if record.is_valid() {
            debug!(
                "{}: {} screenshot(s) {:?}",
                record.original_filename,
                record.screenshot_count(),
                record.screenshot_filenames()
            );
        } else {
            warn!(
                "{} is invalid: {}",
                record.original_filename,
                record.validation_errors().join(", ")
            );
        }

        record
    }

    /// Screenshots for an invoice basename, in canonical order: the
    /// `<basename><ext>` matches first, then `<basename>-1<ext>`,
    /// `<basename>-2<ext>`, ... until the first index with no match.
    pub fn find_screenshots<F>(&self, basename: &str, files: &F) -> Vec<String>
    where
        F: SiblingFiles + ?Sized,
    {
        let mut found = self.matches_for(basename, files);

        for index in 1u64.. {
            let slot = self.matches_for(&format!("{basename}-{index}"), files);
            if slot.is_empty() {
                break;
            }
            found.extend(slot);
        }

        found
    }

    fn matches_for<F>(&self, stem: &str, files: &F) -> Vec<String>
    where
        F: SiblingFiles + ?Sized,
    {
        self.extensions
            .iter()
            .map(|ext| format!("{stem}{ext}"))
            .filter(|name| files.contains(name))
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
