//! Merge of per-document extraction results into one dataset.

mod dataset;
mod orchestrator;

pub use dataset::{DocumentResult, MergeReport, MergedDataset};
pub use orchestrator::{assemble_report, MergeOrchestrator};
