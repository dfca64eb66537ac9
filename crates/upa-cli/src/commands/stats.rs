//! Stats command - report on a merged dataset file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use upa_core::{DatasetStats, MergedDataset};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Merged dataset JSON written by `upa batch`
    #[arg(required = true)]
    input: PathBuf,

    /// Only records admitted in this month (MM/YYYY)
    #[arg(short, long, value_parser = parse_period)]
    period: Option<(i32, u32)>,
}

pub async fn run(args: StatsArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.input.display(), e))?;
    let mut dataset = MergedDataset::from_json(&content)?;

    if let Some((year, month)) = args.period {
        dataset = dataset.admitted_in(year, month);
        println!(
            "{} Admissions in {:02}/{}",
            style("ℹ").blue(),
            month,
            year
        );
    }

    print!("{}", DatasetStats::from_records(dataset.records()).render_report());
    Ok(())
}

/// Parse `MM/YYYY` into `(year, month)`.
fn parse_period(s: &str) -> Result<(i32, u32), String> {
    let (month, year) = s
        .split_once('/')
        .ok_or_else(|| format!("expected MM/YYYY, got '{}'", s))?;

    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| format!("invalid month '{}'", month))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", year))?;

    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {}", month));
    }
    Ok((year, month))
}
