//! Data models: records, documents, configuration.

pub mod config;
pub mod document;
pub mod record;

pub use config::{BatchConfig, ExtractionConfig, OutputConfig, UpaConfig};
pub use document::{documents_in_dir, Document, DocumentKind, DocumentSource, SheetFormat};
pub use record::{CanonicalField, CanonicalRecord, RawRecord, IN_CARE, NOT_INFORMED, TYPE_FIELD};
