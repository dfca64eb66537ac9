//! Record extraction from census spreadsheet exports.

use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::document::Document;
use crate::models::record::{CanonicalRecord, RawRecord};
use crate::reader::DocumentReader;
use crate::sheet::SheetTable;

use super::rules::output_key;
use super::validator::{normalize_dates, validate};
use super::{ExtractionOutcome, RecordExtractor};

/// Extracts one record per spreadsheet row.
#[derive(Debug, Clone)]
pub struct SpreadsheetRecordExtractor {
    /// Worksheet to read.
    sheet_index: usize,
    /// Skip rows with no non-empty cell.
    skip_blank_rows: bool,
    /// Apply date normalization to `Data_Entrada` / `Data_Saida`.
    normalize_dates: bool,
}

impl SpreadsheetRecordExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            sheet_index: config.sheet_index,
            skip_blank_rows: config.skip_blank_rows,
            normalize_dates: config.normalize_spreadsheet_dates,
        }
    }

    /// Set the worksheet index.
    pub fn with_sheet_index(mut self, index: usize) -> Self {
        self.sheet_index = index;
        self
    }

    /// Set date normalization.
    pub fn with_date_normalization(mut self, normalize: bool) -> Self {
        self.normalize_dates = normalize;
        self
    }

    /// Map one row onto raw record fields.
    ///
    /// Headers go through the rename table; empty cells are left out so
    /// the validator fills them.
    pub fn row_to_raw(&self, table: &SheetTable, row: &[Option<String>]) -> RawRecord {
        table
            .row_cells(row)
            .filter_map(|(header, cell)| cell.map(|value| (output_key(header), value)))
            .collect()
    }

    /// Extract records from a table, in row order.
    pub fn extract_from_table(&self, table: &SheetTable) -> Vec<CanonicalRecord> {
        let records: Vec<CanonicalRecord> = table
            .rows
            .iter()
            .map(|row| self.row_to_raw(table, row))
            .filter(|raw| !(self.skip_blank_rows && raw.is_empty()))
            .map(|raw| {
                let record = validate(raw);
                if self.normalize_dates {
                    normalize_dates(record)
                } else {
                    record
                }
            })
            .collect();

        debug!(
            "Extracted {} records from {} rows",
            records.len(),
            table.row_count()
        );
        records
    }
}

impl Default for SpreadsheetRecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for SpreadsheetRecordExtractor {
    fn extract(&self, reader: &dyn DocumentReader, document: &Document) -> ExtractionOutcome {
        match reader.read_table(document, self.sheet_index) {
            Ok(table) => {
                let records = self.extract_from_table(&table);
                info!("{}: {} records", document.name, records.len());
                ExtractionOutcome::Records { records }
            }
            Err(e) => {
                warn!("Failed to read spreadsheet {}: {}", document.name, e);
                ExtractionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
