//! Process command - extract the records of a single document.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use upa_core::{
    CanonicalField, CanonicalRecord, Document, ExtractionOutcome, MergeOrchestrator,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, XLSX or XLS)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// CSV with one row per record
    Csv,
    /// Plain text listing
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Extracting {}", args.input.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let orchestrator = MergeOrchestrator::from_config(&config.extraction);
    let result = orchestrator.extract_document(&Document::from_path(&args.input));

    pb.finish_and_clear();

    let records = match result.outcome {
        ExtractionOutcome::Records { records } => records,
        ExtractionOutcome::Failed { reason } => {
            anyhow::bail!("Failed to process {}: {}", result.name, reason)
        }
        ExtractionOutcome::Unsupported => {
            anyhow::bail!("Unsupported file format: {}", result.name)
        }
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Csv => format_records_csv(&records)?,
        OutputFormat::Text => format_records_text(&records),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    eprintln!(
        "{} {} records extracted in {}ms",
        style("ℹ").blue(),
        records.len(),
        result.processing_time_ms
    );

    Ok(())
}

/// Canonical columns first, then every extra key in sorted order.
fn csv_columns(records: &[CanonicalRecord]) -> Vec<String> {
    let extras: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extras.keys().map(String::as_str))
        .collect();

    let mut columns: Vec<String> = CanonicalField::ALL
        .iter()
        .map(|f| f.key().to_string())
        .collect();
    columns.extend(extras.into_iter().map(str::to_string));
    columns
}

pub fn format_records_csv(records: &[CanonicalRecord]) -> anyhow::Result<String> {
    let columns = csv_columns(records);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(&columns)?;
    for record in records {
        wtr.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_records_text(records: &[CanonicalRecord]) -> String {
    let mut output = String::new();

    output.push_str("═══════════════════════════════════════════════════════════════\n");
    output.push_str(&format!("                    REGISTROS ({})\n", records.len()));
    output.push_str("═══════════════════════════════════════════════════════════════\n");

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format!("\n{:>4}. {}\n", i + 1, record.name));
        for field in &CanonicalField::ALL[1..] {
            output.push_str(&format!("      {:<14} {}\n", field.key(), record.field(*field)));
        }
        for (key, value) in &record.extras {
            output.push_str(&format!("      {:<14} {}\n", key, value));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use upa_core::{validate, RawRecord, NOT_INFORMED};

    fn records() -> Vec<CanonicalRecord> {
        vec![
            validate(RawRecord::new().with("Nome", "ANA").with("Tipo", "R E M")),
            validate(
                RawRecord::new()
                    .with("Nome", "JOÃO")
                    .with("Status", "ALTA")
                    .with("Leito", "12"),
            ),
        ]
    }

    #[test]
    fn test_csv_columns() {
        let columns = csv_columns(&records());
        assert_eq!(
            columns,
            vec![
                "Nome",
                "Data_Entrada",
                "Data_Saida",
                "Hospital",
                "Status",
                "Setor",
                "Leito",
                "Tipo"
            ]
        );
    }

    #[test]
    fn test_format_csv() {
        let csv = format_records_csv(&records()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ANA,"));
        assert!(lines[1].ends_with(",,R E M"));
        assert!(lines[2].contains("JOÃO"));
        assert!(lines[2].contains(NOT_INFORMED));
    }

    #[test]
    fn test_format_text() {
        let text = format_records_text(&records());
        assert!(text.contains("REGISTROS (2)"));
        assert!(text.contains("   1. ANA\n"));
        assert!(text.contains("Leito"));
    }
}
