//! Batch command - merge every document of an input directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use upa_core::{
    assemble_report, documents_in_dir, DatasetStats, Document, DocumentKind, DocumentResult,
    ExtractionOutcome, MergeOrchestrator, MergeReport,
};

use super::{load_config, path_or};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory (default: batch.input_dir from config)
    input_dir: Option<PathBuf>,

    /// Output directory (default: batch.output_dir from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of documents extracted concurrently
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Also write a per-document summary CSV
    #[arg(long)]
    summary: bool,
}

/// Files written by one batch run.
#[derive(Debug, Default)]
struct BatchOutputs {
    dataset: Option<PathBuf>,
    stats: Option<PathBuf>,
    summary: Option<PathBuf>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let input_dir = path_or(args.input_dir, &config.batch.input_dir);
    let output_dir = path_or(args.output_dir, &config.batch.output_dir);
    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let timeout = (config.batch.document_timeout_secs > 0)
        .then(|| Duration::from_secs(config.batch.document_timeout_secs));

    let documents = documents_in_dir(&input_dir)?;
    if documents.is_empty() {
        warn!("No files found in {}", input_dir.display());
        println!(
            "{} No files found in {}",
            style("ℹ").blue(),
            input_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        documents.len()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let orchestrator = Arc::new(MergeOrchestrator::from_config(&config.extraction));
    let results = extract_all(orchestrator, documents, jobs, timeout, &pb).await;
    pb.finish_and_clear();

    let report = assemble_report(results)?;
    let skipped = report
        .documents
        .iter()
        .filter(|d| d.outcome == ExtractionOutcome::Unsupported)
        .count();
    let document_count = report.documents.len();

    let mut outputs = BatchOutputs::default();
    if args.summary {
        fs::create_dir_all(&output_dir)?;
        let summary_path = output_dir.join("summary.csv");
        write_summary(&summary_path, &report)?;
        outputs.summary = Some(summary_path);
    }

    let failures: Vec<(String, String)> = report
        .failed()
        .map(|d| (d.name.clone(), failure_reason(&d.outcome).to_string()))
        .collect();

    let dataset = report.into_dataset();
    info!("Merged {} records from {} files", dataset.len(), document_count);

    if dataset.is_empty() {
        warn!("No records extracted, nothing written");
    } else {
        fs::create_dir_all(&output_dir)?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();

        let dataset_path = output_dir.join(format!("merged_data_{}.json", timestamp));
        fs::write(&dataset_path, dataset.to_json(config.output.pretty)?)?;
        debug!("Wrote merged dataset to {}", dataset_path.display());
        outputs.dataset = Some(dataset_path);

        if config.output.write_stats {
            let stats_path = output_dir.join(format!("merged_stats_{}.txt", timestamp));
            let stats = DatasetStats::from_records(dataset.records()).render_report();
            fs::write(&stats_path, stats)?;
            debug!("Wrote statistics to {}", stats_path.display());
            outputs.stats = Some(stats_path);
        }
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        document_count,
        start.elapsed()
    );
    println!(
        "   {} records, {} failed, {} skipped",
        style(dataset.len()).green(),
        style(failures.len()).red(),
        style(skipped).yellow()
    );

    for path in [&outputs.dataset, &outputs.stats, &outputs.summary]
        .into_iter()
        .flatten()
    {
        println!("{} Wrote {}", style("✓").green(), path.display());
    }

    if !failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (name, reason) in &failures {
            println!("  - {}: {}", name, reason);
        }
    }

    Ok(())
}

/// Extract documents concurrently, at most `jobs` at a time, keeping input
/// order. A document that exceeds `timeout` is reported as failed; `None`
/// waits for every document.
async fn extract_all(
    orchestrator: Arc<MergeOrchestrator>,
    documents: Vec<Document>,
    jobs: usize,
    timeout: Option<Duration>,
    pb: &ProgressBar,
) -> Vec<DocumentResult> {
    stream::iter(documents)
        .map(|document| {
            let orchestrator = Arc::clone(&orchestrator);
            let pb = pb.clone();
            async move {
                let name = document.name.clone();
                let kind = document.kind();
                let task =
                    tokio::task::spawn_blocking(move || orchestrator.extract_document(&document));

                let joined = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, task).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            warn!("Timed out extracting {}", name);
                            pb.inc(1);
                            return failed_result(
                                name,
                                kind,
                                format!("timed out after {}s", limit.as_secs()),
                                limit.as_millis() as u64,
                            );
                        }
                    },
                    None => task.await,
                };

                let result = match joined {
                    Ok(result) => result,
                    Err(e) => failed_result(name, kind, format!("extraction aborted: {}", e), 0),
                };

                pb.inc(1);
                result
            }
        })
        .buffered(jobs)
        .collect()
        .await
}

fn failed_result(
    name: String,
    kind: Option<DocumentKind>,
    reason: String,
    processing_time_ms: u64,
) -> DocumentResult {
    DocumentResult {
        name,
        kind,
        outcome: ExtractionOutcome::Failed { reason },
        processing_time_ms,
    }
}

fn failure_reason(outcome: &ExtractionOutcome) -> &str {
    match outcome {
        ExtractionOutcome::Failed { reason } => reason,
        _ => "",
    }
}

fn write_summary(path: &Path, report: &MergeReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "kind",
        "status",
        "records",
        "processing_time_ms",
        "error",
    ])?;

    for result in &report.documents {
        let kind = result.kind.map(|k| k.to_string()).unwrap_or_default();
        wtr.write_record([
            result.name.as_str(),
            kind.as_str(),
            result.outcome.label(),
            &result.records().len().to_string(),
            &result.processing_time_ms.to_string(),
            failure_reason(&result.outcome),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
