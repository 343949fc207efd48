//! LaTeX page layout: each valid invoice on its own page, followed by its
//! screenshots.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ReportError;
use crate::models::invoice::InvoiceRecord;

use super::{ReportGenerator, ReportStatus, Result};

/// Marker a custom template must contain; replaced by the generated pages.
pub const PAGES_PLACEHOLDER: &str = "%%PAGES%%";

const DEFAULT_TEMPLATE: &str = r"\documentclass[a4paper, oneside]{article}
\usepackage[a4paper, margin=0.1cm]{geometry}
\usepackage{graphicx}
\pagestyle{empty}
\begin{document}
%%PAGES%%
\end{document}
";

/// Writes a `.tex` document including every valid invoice and screenshot.
#[derive(Debug, Clone)]
pub struct LatexLayoutGenerator {
    path: PathBuf,
    resource_prefix: String,
    template: String,
}

impl LatexLayoutGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            resource_prefix: "./resources/".to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Set the prefix prepended to every included file.
    pub fn with_resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_prefix = prefix.into();
        self
    }

    /// Use a custom document template. It must contain [`PAGES_PLACEHOLDER`].
    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PAGES_PLACEHOLDER) {
            return Err(ReportError::Template(format!(
                "template does not contain {}",
                PAGES_PLACEHOLDER
            )));
        }
        self.template = template;
        Ok(self)
    }

    /// Load a custom document template from a file.
    pub fn with_template_file(self, template_path: &Path) -> Result<Self> {
        let template = fs::read_to_string(template_path).map_err(|e| {
            ReportError::Template(format!("{}: {}", template_path.display(), e))
        })?;
        self.with_template(template)
    }

    /// Render the document body for the given records.
    pub fn render(&self, records: &[InvoiceRecord]) -> String {
        let mut pages = String::new();

        for record in records.iter().filter(|r| r.is_valid()) {
            pages.push_str(&self.invoice_page(&record.original_filename));
            for screenshot in record.screenshot_filenames() {
                pages.push_str(&self.screenshot_page(screenshot));
            }
        }

        self.template.replacen(PAGES_PLACEHOLDER, &pages, 1)
    }

    // Invoices are rotated to use the page in landscape.
    fn invoice_page(&self, filename: &str) -> String {
        format!(
            "\\begin{{center}}\n\
             \\includegraphics[width=0.99\\textheight, height=\\textwidth, \
             keepaspectratio, angle=90]{{{}{}}}\n\
             \\end{{center}}\n\
             \\newpage\n",
            self.resource_prefix, filename
        )
    }

    fn screenshot_page(&self, filename: &str) -> String {
        format!(
            "\\begin{{center}}\n\
             \\includegraphics[width=\\textwidth, height=\\paperheight, keepaspectratio]{{{}{}}}\n\
             \\end{{center}}\n\
             \\newpage\n",
            self.resource_prefix, filename
        )
    }
}

impl ReportGenerator for LatexLayoutGenerator {
    fn generate(&self, records: &[InvoiceRecord]) -> Result<ReportStatus> {
        let valid = records.iter().filter(|r| r.is_valid()).count();
        if valid == 0 {
            warn!("no valid invoices, not writing {}", self.path.display());
            return Ok(ReportStatus::Skipped);
        }

        fs::write(&self.path, self.render(records)).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("wrote layout for {} invoice(s) to {}", valid, self.path.display());

        Ok(ReportStatus::Written(self.path.clone()))
    }
}
