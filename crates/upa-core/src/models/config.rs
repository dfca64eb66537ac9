//! Configuration structures for the extraction pipeline and batch job.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for upa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpaConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Startup batch job configuration.
    pub batch: BatchConfig,

    /// Output file configuration.
    pub output: OutputConfig,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Worksheet read from spreadsheets (0 = first sheet).
    pub sheet_index: usize,

    /// Drop spreadsheet rows whose cells are all empty.
    pub skip_blank_rows: bool,

    /// Normalize spreadsheet date columns like PDF dates.
    pub normalize_spreadsheet_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            skip_blank_rows: true,
            normalize_spreadsheet_dates: false,
        }
    }
}

/// Batch job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned for input documents.
    pub input_dir: PathBuf,

    /// Directory the merged dataset and statistics are written to.
    pub output_dir: PathBuf,

    /// Number of documents extracted concurrently.
    pub jobs: usize,

    /// Per-document extraction timeout in seconds (0 = none).
    pub document_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inputs"),
            output_dir: PathBuf::from("outputs"),
            jobs: 4,
            document_timeout_secs: 30,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the merged JSON.
    pub pretty: bool,

    /// Write the statistics report next to the merged dataset.
    pub write_stats: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            write_stats: true,
        }
    }
}

impl UpaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
