//! Core library for merging hospital patient-flow documents.
//!
//! This crate provides:
//! - PDF text extraction and marker-based patient record segmentation
//! - Spreadsheet reading with column renaming to canonical fields
//! - Field validation with "not informed" and "in care" sentinels
//! - Merging of many documents into one ordered dataset, plus statistics

pub mod error;
pub mod merge;
pub mod models;
pub mod pdf;
pub mod reader;
pub mod records;
pub mod sheet;
pub mod stats;

pub use error::{PdfError, Result, SheetError, UpaError};
pub use merge::{assemble_report, DocumentResult, MergeOrchestrator, MergeReport, MergedDataset};
pub use models::config::UpaConfig;
pub use models::document::{documents_in_dir, Document, DocumentKind};
pub use models::record::{CanonicalField, CanonicalRecord, RawRecord, IN_CARE, NOT_INFORMED};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use reader::{DocumentReader, NativeReader};
pub use records::rules::validate_date;
pub use records::{
    normalize_dates, validate, ExtractionOutcome, PdfRecordExtractor, RecordExtractor,
    SpreadsheetRecordExtractor,
};
pub use sheet::SheetTable;
pub use stats::{DatasetStats, ValueCounts};
