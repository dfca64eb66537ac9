//! Dispatches documents to their extractor and concatenates the results.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{Result, UpaError};
use crate::models::config::ExtractionConfig;
use crate::models::document::{Document, DocumentKind};
use crate::reader::{DocumentReader, NativeReader};
use crate::records::{
    ExtractionOutcome, PdfRecordExtractor, RecordExtractor, SpreadsheetRecordExtractor,
};

use super::dataset::{DocumentResult, MergeReport, MergedDataset};

/// Merges PDF reports and spreadsheet exports into one record stream.
///
/// Holds no per-document state, so one orchestrator can serve a batch job
/// and concurrent callers alike.
pub struct MergeOrchestrator<R = NativeReader> {
    reader: R,
    pdf: PdfRecordExtractor,
    spreadsheet: SpreadsheetRecordExtractor,
}

impl MergeOrchestrator<NativeReader> {
    /// Create an orchestrator with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_reader(NativeReader::new(), config)
    }
}

impl Default for MergeOrchestrator<NativeReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DocumentReader> MergeOrchestrator<R> {
    /// Create an orchestrator over a custom document reader.
    pub fn with_reader(reader: R, config: &ExtractionConfig) -> Self {
        Self {
            reader,
            pdf: PdfRecordExtractor::new(),
            spreadsheet: SpreadsheetRecordExtractor::from_config(config),
        }
    }

    /// Extract one document with the extractor matching its kind.
    ///
    /// Unsupported files are skipped, unreadable ones are reported as
    /// failed; neither is an error.
    pub fn extract_document(&self, document: &Document) -> DocumentResult {
        let start = Instant::now();
        let kind = document.kind();

        let outcome = match kind {
            Some(DocumentKind::Pdf) => self.pdf.extract(&self.reader, document),
            Some(DocumentKind::Spreadsheet) => self.spreadsheet.extract(&self.reader, document),
            None => {
                debug!("Skipping unsupported file {}", document.name);
                ExtractionOutcome::Unsupported
            }
        };

        DocumentResult {
            name: document.name.clone(),
            kind,
            outcome,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Extract every document, keeping per-document results in input order.
    pub fn merge_with_provenance(&self, documents: &[Document]) -> Result<MergeReport> {
        if documents.is_empty() {
            return Err(UpaError::NoDocuments);
        }

        info!("Merging {} documents", documents.len());
        let results: Vec<DocumentResult> = documents
            .iter()
            .map(|document| self.extract_document(document))
            .collect();

        assemble_report(results)
    }

    /// Extract every document and concatenate the records in input order.
    pub fn merge(&self, documents: &[Document]) -> Result<MergedDataset> {
        Ok(self.merge_with_provenance(documents)?.into_dataset())
    }
}

/// Combine per-document results, already in input order, into a report.
///
/// Shared by the sequential merge and callers that run
/// [`MergeOrchestrator::extract_document`] concurrently.
pub fn assemble_report(results: Vec<DocumentResult>) -> Result<MergeReport> {
    if results.is_empty() {
        return Err(UpaError::NoDocuments);
    }

    let total = results.len();
    let report = MergeReport::from_results(results);
    let failed = report.failed().count();
    if failed > 0 {
        warn!("{} of {} documents could not be read", failed, total);
    }
    info!("Merged {} records", report.record_count());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PdfError, SheetError};
    use crate::models::record::NOT_INFORMED;
    use crate::pdf::extractor::tests::{pdf_with_undeclared_font, sample_pdf};
    use crate::sheet::workbook::tests::sample_xlsx;
    use crate::sheet::SheetTable;
    use pretty_assertions::assert_eq;

    /// Reads document bytes as UTF-8: PDFs as their text, spreadsheets as
    /// `;`-separated lines with a header line. Bytes starting with `!` fail.
    struct FakeReader;

    impl DocumentReader for FakeReader {
        fn read_pdf_text(&self, document: &Document) -> Result<String> {
            let data = document.load_bytes()?;
            if data.starts_with(b"!") {
                return Err(PdfError::Parse("corrupt".to_string()).into());
            }
            Ok(String::from_utf8_lossy(&data).into_owned())
        }

        fn read_table(&self, document: &Document, _sheet_index: usize) -> Result<SheetTable> {
            let data = document.load_bytes()?;
            if data.starts_with(b"!") {
                return Err(SheetError::Open("corrupt".to_string()).into());
            }
            let text = String::from_utf8_lossy(&data).into_owned();
            let mut lines = text.lines();
            let headers = lines
                .next()
                .map(|l| l.split(';').map(str::to_string).collect())
                .unwrap_or_default();
            let rows = lines
                .map(|l| {
                    l.split(';')
                        .map(|c| (!c.is_empty()).then(|| c.to_string()))
                        .collect()
                })
                .collect();
            Ok(SheetTable::new(headers, rows))
        }
    }

    fn orchestrator() -> MergeOrchestrator<FakeReader> {
        MergeOrchestrator::with_reader(FakeReader, &ExtractionConfig::default())
    }

    fn pdf(name: &str, text: &str) -> Document {
        Document::from_bytes(name, text.as_bytes().to_vec())
    }

    fn names(dataset: &MergedDataset) -> Vec<&str> {
        dataset.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_merge_preserves_document_order() {
        let docs = vec![
            pdf("A.pdf", "R E M ANA PS 1 R E M BRUNO BOX 2"),
            pdf("B.xlsx", "Nome;Fim;Destino\nCARLA;ALTA;HRAN\nDIEGO;OBITO;"),
            pdf("C.pdf", "S P EVA ISOL"),
        ];

        let dataset = orchestrator().merge(&docs).unwrap();
        assert_eq!(names(&dataset), vec!["ANA", "BRUNO", "CARLA", "DIEGO", "EVA"]);

        let records = dataset.records();
        assert_eq!(records[0].patient_type(), Some("R E M"));
        assert_eq!(records[2].status, "ALTA");
        assert_eq!(records[2].hospital, "HRAN");
        assert_eq!(records[3].hospital, NOT_INFORMED);
        assert_eq!(records[2].patient_type(), None);
    }

    #[test]
    fn test_corrupt_document_is_isolated() {
        let docs = vec![
            pdf("A.pdf", "R E M ANA PS"),
            pdf("B.xlsx", "!garbage"),
            pdf("C.pdf", "C T I EVA BOX"),
        ];

        let report = orchestrator().merge_with_provenance(&docs).unwrap();
        assert_eq!(report.documents.len(), 3);
        assert!(report.documents[1].outcome.is_failed());
        assert_eq!(report.failed().count(), 1);

        let dataset = report.into_dataset();
        assert_eq!(names(&dataset), vec!["ANA", "EVA"]);
    }

    #[test]
    fn test_unsupported_files_skipped() {
        let docs = vec![pdf("notas.txt", "R E M ANA PS"), pdf("A.pdf", "S P EVA PS")];

        let report = orchestrator().merge_with_provenance(&docs).unwrap();
        assert_eq!(report.documents[0].kind, None);
        assert_eq!(report.documents[0].outcome, ExtractionOutcome::Unsupported);
        assert!(!report.documents[0].outcome.is_failed());
        assert_eq!(names(&report.into_dataset()), vec!["EVA"]);
    }

    #[test]
    fn test_empty_document_list_is_error() {
        let err = orchestrator().merge(&[]).unwrap_err();
        assert!(matches!(err, UpaError::NoDocuments));
    }

    #[test]
    fn test_documents_without_records() {
        let docs = vec![pdf("A.pdf", ""), pdf("B.xlsx", "Nome;Fim")];
        let report = orchestrator().merge_with_provenance(&docs).unwrap();
        assert_eq!(report.failed().count(), 0);
        assert_eq!(report.record_count(), 0);
    }

    #[test]
    fn test_duplicates_preserved() {
        let docs = vec![
            pdf("A.pdf", "R E M ANA PS"),
            pdf("B.xlsx", "Nome\nANA"),
        ];
        let dataset = orchestrator().merge(&docs).unwrap();
        assert_eq!(names(&dataset), vec!["ANA", "ANA"]);
    }

    #[test]
    fn test_native_reader_end_to_end() {
        let docs = vec![
            Document::from_bytes(
                "censo.pdf",
                sample_pdf(&["R E M JOAO DA SILVA PS 1", "C T I MARIA OLIVEIRA BOX 2"]),
            ),
            Document::from_bytes("altas.xlsx", b"corrupted".to_vec()),
        ];

        let report = MergeOrchestrator::new().merge_with_provenance(&docs).unwrap();
        assert!(report.documents[1].outcome.is_failed());

        let dataset = report.into_dataset();
        assert_eq!(names(&dataset), vec!["JOAO DA SILVA", "MARIA OLIVEIRA"]);
    }

    #[test]
    fn test_unreadable_pdf_text_is_isolated() {
        let docs = vec![
            Document::from_bytes("quebrado.pdf", pdf_with_undeclared_font(&["R E M ANA PS"])),
            Document::from_bytes("censo.pdf", sample_pdf(&["C T I EVA BOX 2"])),
        ];

        let report = MergeOrchestrator::new().merge_with_provenance(&docs).unwrap();
        assert!(report.documents[0].outcome.is_failed());
        assert!(!report.documents[1].outcome.is_failed());
        assert_eq!(names(&report.into_dataset()), vec!["EVA"]);
    }

    #[test]
    fn test_native_reader_reads_xlsx() {
        let docs = vec![
            Document::from_bytes("censo.pdf", sample_pdf(&["R E M JOAO PS 1"])),
            Document::from_bytes("altas.xlsx", sample_xlsx()),
        ];

        let dataset = MergeOrchestrator::new().merge(&docs).unwrap();
        assert_eq!(names(&dataset), vec!["JOAO", "MARIA SOUZA", "PEDRO LIMA"]);

        let records = dataset.records();
        assert_eq!(records[1].status, "ALTA");
        assert_eq!(records[1].discharge_date, "10/01/2024");
        assert_eq!(records[2].hospital, NOT_INFORMED);
    }

    #[test]
    fn test_assemble_report_from_concurrent_results() {
        let orchestrator = orchestrator();
        let docs = [pdf("A.pdf", "R E M ANA PS"), pdf("B.xlsx", "!garbage")];
        let results: Vec<DocumentResult> =
            docs.iter().map(|d| orchestrator.extract_document(d)).collect();

        let report = assemble_report(results).unwrap();
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.failed().count(), 1);
        assert_eq!(report.record_count(), 1);

        let err = assemble_report(Vec::new()).unwrap_err();
        assert!(matches!(err, UpaError::NoDocuments));
    }
}
