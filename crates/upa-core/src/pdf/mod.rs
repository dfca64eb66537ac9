//! PDF processing module.

pub(crate) mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// No text, but page images (scanned document).
    Scanned,
    /// Neither text nor images.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract the text of each page, in page order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;

    /// Extract the text of the entire PDF, pages joined in order.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_page_texts()?.join("\n"))
    }
}
