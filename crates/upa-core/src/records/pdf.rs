//! Record extraction from census PDF reports.

use tracing::{debug, info, warn};

use crate::models::document::Document;
use crate::models::record::{CanonicalRecord, RawRecord, NOT_INFORMED, TYPE_FIELD};
use crate::reader::DocumentReader;

use super::rules::{blocks, extract_name};
use super::validator::{normalize_dates, validate};
use super::{ExtractionOutcome, RecordExtractor};

/// Extracts one record per patient block of a PDF report.
#[derive(Debug, Clone, Default)]
pub struct PdfRecordExtractor;

impl PdfRecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract records from the concatenated text of a report.
    ///
    /// Each marker-opened block yields exactly one record carrying `Tipo`
    /// and `Nome` (the sentinel when no name is found). Text without
    /// markers yields no records.
    pub fn extract_from_text(&self, text: &str) -> Vec<CanonicalRecord> {
        let records: Vec<CanonicalRecord> = blocks(text)
            .into_iter()
            .map(|block| {
                let name = extract_name(block.body).unwrap_or_else(|| {
                    debug!("No name found in {} block", block.patient_type);
                    NOT_INFORMED.to_string()
                });

                let raw = RawRecord::new()
                    .with("Nome", name)
                    .with(TYPE_FIELD, block.patient_type.code());

                normalize_dates(validate(raw))
            })
            .collect();

        debug!(
            "Extracted {} records from {} characters of text",
            records.len(),
            text.len()
        );
        records
    }
}

impl RecordExtractor for PdfRecordExtractor {
    fn extract(&self, reader: &dyn DocumentReader, document: &Document) -> ExtractionOutcome {
        match reader.read_pdf_text(document) {
            Ok(text) => {
                let records = self.extract_from_text(&text);
                info!("{}: {} records", document.name, records.len());
                ExtractionOutcome::Records { records }
            }
            Err(e) => {
                warn!("Failed to read PDF {}: {}", document.name, e);
                ExtractionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
