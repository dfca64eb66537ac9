//! Source documents handed to the extraction pipeline.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, UpaError};

/// Which extractor a document is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// PDF report.
    Pdf,
    /// Spreadsheet export (`.xlsx` / `.xls`).
    Spreadsheet,
}

impl DocumentKind {
    /// Classify a file name by extension (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match extension(name).as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("xlsx") | Some("xls") => Some(DocumentKind::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => f.write_str("pdf"),
            DocumentKind::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// Spreadsheet container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy BIFF workbook.
    Xls,
}

impl SheetFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match extension(name).as_deref() {
            Some("xlsx") => Some(SheetFormat::Xlsx),
            Some("xls") => Some(SheetFormat::Xls),
            _ => None,
        }
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Where a document's content comes from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// In-memory bytes (e.g. an upload).
    Bytes(Vec<u8>),
    /// A file on disk (batch mode).
    Path(PathBuf),
}

/// A document to extract records from.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name used for type dispatch and provenance.
    pub name: String,
    /// Content source.
    pub source: DocumentSource,
}

impl Document {
    /// A document backed by a file on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: DocumentSource::Path(path),
        }
    }

    /// A document backed by in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: DocumentSource::Bytes(data),
        }
    }

    /// Detected kind, or `None` for unsupported files.
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_name(&self.name)
    }

    /// Document content, read from disk if needed.
    pub fn load_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.source {
            DocumentSource::Bytes(data) => Ok(Cow::Borrowed(data)),
            DocumentSource::Path(path) => Ok(Cow::Owned(fs::read(path)?)),
        }
    }
}

/// List the documents of a batch input directory, sorted by file name.
///
/// Unsupported files are included; the merge skips them. A missing
/// directory is an error.
pub fn documents_in_dir(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(UpaError::InputDirMissing(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    debug!("Found {} files in {}", paths.len(), dir.display());
    Ok(paths.into_iter().map(Document::from_path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(DocumentKind::from_name("censo.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_name("CENSO.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_name("altas.xlsx"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_name("altas.XLS"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_name("notas.csv"), None);
        assert_eq!(DocumentKind::from_name("sem_extensao"), None);
    }

    #[test]
    fn test_sheet_format_from_name() {
        assert_eq!(SheetFormat::from_name("a.xlsx"), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_name("a.xls"), Some(SheetFormat::Xls));
        assert_eq!(SheetFormat::from_name("a.pdf"), None);
    }

    #[test]
    fn test_documents_in_dir_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        fs::write(dir.path().join("c.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let docs = documents_in_dir(dir.path()).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.xlsx", "c.txt"]);
    }

    #[test]
    fn test_documents_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("inputs");
        assert!(matches!(
            documents_in_dir(&missing),
            Err(UpaError::InputDirMissing(_))
        ));
    }

    #[test]
    fn test_load_bytes_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let doc = Document::from_path(&path);
        assert_eq!(doc.name, "a.pdf");
        assert_eq!(doc.load_bytes().unwrap().as_ref(), b"%PDF-1.4");
    }
}
