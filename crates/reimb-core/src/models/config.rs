//! Configuration structures for the reconciliation pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReimbError, Result};

/// Main configuration for reimb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReimbConfig {
    /// Directory scan configuration.
    pub scan: ScanConfig,

    /// Screenshot association configuration.
    pub validation: ValidationConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

/// Directory scan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension (without the dot) that marks an invoice file.
    pub invoice_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            invoice_extension: "pdf".to_string(),
        }
    }
}

/// Screenshot association configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Screenshot extensions, in preference order, including the dot.
    pub screenshot_extensions: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            screenshot_extensions: [".jpg", ".png", ".jpeg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name of the CSV summary inside the output directory.
    pub summary_filename: String,

    /// File name of the LaTeX layout inside the output directory.
    pub layout_filename: String,

    /// Prefix prepended to every image path in the LaTeX layout.
    pub resource_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_filename: "invoices.csv".to_string(),
            layout_filename: "invoices.tex".to_string(),
            resource_prefix: "./resources/".to_string(),
        }
    }
}

impl ReimbConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ReimbError::Config(format!("{}: {}", path.display(), e)))?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ReimbError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.scan.invoice_extension.is_empty() || self.scan.invoice_extension.contains('.') {
            return Err(ReimbError::Config(format!(
                "scan.invoice_extension must be a bare extension, got {:?}",
                self.scan.invoice_extension
            )));
        }
        if self.validation.screenshot_extensions.is_empty() {
            return Err(ReimbError::Config(
                "validation.screenshot_extensions must not be empty".to_string(),
            ));
        }
        if let Some(ext) = self
            .validation
            .screenshot_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(ReimbError::Config(format!(
                "screenshot extension {:?} must start with '.'",
                ext
            )));
        }
        Ok(())
    }

    /// Full path of the CSV summary for an output directory.
    pub fn summary_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.report.summary_filename)
    }

    /// Full path of the LaTeX layout for an output directory.
    pub fn layout_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.report.layout_filename)
    }
}
