//! Merged dataset and per-document provenance.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::document::DocumentKind;
use crate::models::record::CanonicalRecord;
use crate::records::rules::parse_dmy;
use crate::records::ExtractionOutcome;

use chrono::Datelike;

/// Extraction result of one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// Document file name.
    pub name: String,
    /// Detected kind, `None` for unsupported files.
    pub kind: Option<DocumentKind>,
    /// What the extractor produced.
    #[serde(flatten)]
    pub outcome: ExtractionOutcome,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl DocumentResult {
    pub fn records(&self) -> &[CanonicalRecord] {
        self.outcome.records()
    }
}

/// Per-document view of a merge, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    pub documents: Vec<DocumentResult>,
}

impl MergeReport {
    /// Assemble a report from results already in input order.
    pub fn from_results(documents: Vec<DocumentResult>) -> Self {
        Self { documents }
    }

    /// All records, document by document.
    pub fn records(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.documents.iter().flat_map(|d| d.records())
    }

    pub fn record_count(&self) -> usize {
        self.documents.iter().map(|d| d.records().len()).sum()
    }

    /// Documents whose extraction failed.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|d| d.outcome.is_failed())
    }

    /// Flatten into the merged dataset.
    pub fn into_dataset(self) -> MergedDataset {
        MergedDataset {
            records: self
                .documents
                .into_iter()
                .flat_map(|d| d.outcome.into_records())
                .collect(),
        }
    }
}

/// Flat, ordered concatenation of every document's records.
///
/// No sorting and no deduplication: the same patient appearing in two
/// documents appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedDataset {
    records: Vec<CanonicalRecord>,
}

impl MergedDataset {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    /// Records admitted in the given month.
    ///
    /// Only admission dates in strict `dd/mm/yyyy` form are considered;
    /// sentinel or unparseable dates are excluded.
    pub fn admitted_in(&self, year: i32, month: u32) -> MergedDataset {
        let records = self
            .records
            .iter()
            .filter(|r| {
                parse_dmy(&r.admission_date)
                    .is_some_and(|d| d.year() == year && d.month() == month)
            })
            .cloned()
            .collect();
        MergedDataset { records }
    }

    /// Serialize as a JSON array. Non-ASCII text is written as-is.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'a> IntoIterator for &'a MergedDataset {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
