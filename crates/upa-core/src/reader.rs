//! Document content access: PDF text and spreadsheet tables.

use tracing::{debug, warn};

use crate::error::{Result, SheetError};
use crate::models::document::{Document, SheetFormat};
use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};
use crate::sheet::{load_table, SheetTable};

/// Trait for turning a document into text or a table.
///
/// Record extractors only see this seam, so the binary formats can be
/// swapped out (or faked in tests) without touching extraction rules.
pub trait DocumentReader: Send + Sync {
    /// Text of every page, concatenated in page order.
    fn read_pdf_text(&self, document: &Document) -> Result<String>;

    /// One worksheet as a table with its header row.
    fn read_table(&self, document: &Document, sheet_index: usize) -> Result<SheetTable>;
}

/// Reader backed by lopdf/pdf-extract and calamine.
#[derive(Debug, Clone, Default)]
pub struct NativeReader;

impl NativeReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for NativeReader {
    fn read_pdf_text(&self, document: &Document) -> Result<String> {
        let data = document.load_bytes()?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;

        let text = extractor.extract_text()?;
        match extractor.analyze_text(&text) {
            PdfType::Text => {}
            PdfType::Scanned => warn!(
                "{} has no extractable text (scanned pages?), no records will be found",
                document.name
            ),
            PdfType::Empty => debug!("{} is empty", document.name),
        }

        Ok(text)
    }

    fn read_table(&self, document: &Document, sheet_index: usize) -> Result<SheetTable> {
        let format = SheetFormat::from_name(&document.name)
            .ok_or_else(|| SheetError::UnsupportedFormat(document.name.clone()))?;
        let data = document.load_bytes()?;
        Ok(load_table(&data, format, sheet_index)?)
    }
}
