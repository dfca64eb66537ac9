//! Patient record extraction: PDF reports, spreadsheet exports, validation.

mod pdf;
pub mod rules;
mod sheet;
pub mod validator;

pub use pdf::PdfRecordExtractor;
pub use sheet::SpreadsheetRecordExtractor;
pub use validator::{normalize_dates, validate};

use serde::Serialize;

use crate::models::document::Document;
use crate::models::record::CanonicalRecord;
use crate::reader::DocumentReader;

/// Outcome of extracting one document.
///
/// Extraction fails closed: an unreadable document is `Failed` and
/// contributes no records to a merge, it never aborts it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The document was read; zero or more records were found.
    Records { records: Vec<CanonicalRecord> },
    /// The document could not be opened or parsed.
    Failed { reason: String },
    /// The document type is not handled and was skipped.
    Unsupported,
}

impl ExtractionOutcome {
    /// Records contributed to a merge (empty unless `Records`).
    pub fn records(&self) -> &[CanonicalRecord] {
        match self {
            ExtractionOutcome::Records { records } => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Vec<CanonicalRecord> {
        match self {
            ExtractionOutcome::Records { records } => records,
            _ => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed { .. })
    }

    /// Short status label.
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionOutcome::Records { .. } => "success",
            ExtractionOutcome::Failed { .. } => "error",
            ExtractionOutcome::Unsupported => "skipped",
        }
    }
}

/// Trait for per-format record extractors.
pub trait RecordExtractor {
    /// Extract canonical records from one document. Never fails; read and
    /// parse errors come back as [`ExtractionOutcome::Failed`].
    fn extract(&self, reader: &dyn DocumentReader, document: &Document) -> ExtractionOutcome;
}
