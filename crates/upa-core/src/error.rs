//! Error types for the upa-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the upa library.
#[derive(Error, Debug)]
pub enum UpaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Spreadsheet processing error.
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The merge was asked to run over an empty document list.
    #[error("no documents supplied")]
    NoDocuments,

    /// The batch input directory does not exist.
    #[error("input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to spreadsheet processing.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open the workbook.
    #[error("failed to open workbook: {0}")]
    Open(String),

    /// The requested worksheet does not exist.
    #[error("workbook has no sheet at index {0}")]
    MissingSheet(usize),

    /// Failed to read the cell range of a worksheet.
    #[error("failed to read sheet: {0}")]
    Range(String),

    /// The document is not a spreadsheet format we can read.
    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the upa library.
pub type Result<T> = std::result::Result<T, UpaError>;
