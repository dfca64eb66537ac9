//! PDF text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf for structure and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Classify already extracted text against the loaded document.
    pub fn analyze_text(&self, text: &str) -> PdfType {
        let pdf_type = if !text.trim().is_empty() {
            PdfType::Text
        } else if self.has_images() {
            PdfType::Scanned
        } else {
            PdfType::Empty
        };

        debug!("PDF analysis: {} chars text -> {:?}", text.len(), pdf_type);
        pdf_type
    }

    /// Whether any image XObject exists in the document.
    fn has_images(&self) -> bool {
        let doc = match self.document.as_ref() {
            Some(d) => d,
            None => return false,
        };

        doc.objects.values().any(|object| {
            if let Object::Stream(stream) = object {
                let is_image = stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|s| s.as_name())
                    .map(|name| name == b"Image")
                    .unwrap_or(false);
                if is_image {
                    trace!("Found image object");
                }
                is_image
            } else {
                false
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown error".to_string());
    format!("text extractor panicked: {}", detail)
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        self.analyze_text(&text)
    }

    fn extract_page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf-extract panics on some structures lopdf accepts (undeclared fonts).
        let data = self.raw_data.as_slice();
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }))
        .map_err(|payload| PdfError::TextExtraction(panic_message(payload.as_ref())))?
        .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        trace!("Extracted text from {} pages", pages.len());
        Ok(pages)
    }
}
