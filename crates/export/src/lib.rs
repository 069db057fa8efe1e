//! Paginated A4 export of business plans and analyses.
//!
//! Rendering is a single forward pass: each writer appends positioned text
//! and shape commands to the current page and opens a new page when the
//! cursor runs past the bottom limit. The finished [`Document`] is then
//! serialized to PDF.

mod analysis;
mod business_plan;
mod charts;
mod document;
mod errors;
mod fonts;
mod layout;
mod naming;
mod pdf;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use domain::entities::{ComparativeAnalysis, GeneratedBusinessPlan};
use tracing::info;

pub use analysis::analysis_document;
pub use business_plan::business_plan_document;
pub use document::{Align, Color, Command, Document, Page, TextStyle};
pub use errors::{ExportError, ExportResult};
pub use fonts::text_width_mm;
pub use layout::{wrap_text, PageWriter};
pub use naming::{analysis_file_name, business_plan_file_name};

/// Writes exported documents into one output directory
#[derive(Debug, Clone)]
pub struct PdfExporter {
    output_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `Business_Plan_<Company>_<date>.pdf`
    pub fn export_business_plan(
        &self,
        plan: &GeneratedBusinessPlan,
        today: NaiveDate,
    ) -> ExportResult<PathBuf> {
        let document = business_plan_document(plan, today);
        let name = business_plan_file_name(&plan.metadata.company_name, today);
        self.write(&name, &document)
    }

    /// `Analyse_<Sector>_<date>.pdf`
    pub fn export_analysis(
        &self,
        analysis: &ComparativeAnalysis,
        today: NaiveDate,
    ) -> ExportResult<PathBuf> {
        let document = analysis_document(analysis, today);
        let name = analysis_file_name(&analysis.company_data.sector, today);
        self.write(&name, &document)
    }

    fn write(&self, file_name: &str, document: &Document) -> ExportResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_dir.join(file_name);
        let bytes = pdf::serialize(document);
        std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), pages = document.pages.len(), bytes = bytes.len(), "document exported");
        Ok(path)
    }
}

impl Document {
    /// Serialized PDF bytes
    pub fn to_pdf(&self) -> Vec<u8> {
        pdf::serialize(self)
    }
}
