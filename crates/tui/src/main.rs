mod app;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use hotseat_core::model::{RejectedRow, TableDataset};
use hotseat_core::views::compare_datasets;
use tracing_subscriber::EnvFilter;

/// Ranked table view for flat profiling samples.
#[derive(Debug, Parser)]
#[command(name = "hotseat", version)]
struct Cli {
    /// Dataset payload: a query response envelope or a bare row array.
    file: Option<PathBuf>,

    /// Baseline payload for diff mode.
    #[arg(long, requires = "comparison", conflicts_with = "file")]
    baseline: Option<PathBuf>,

    /// Comparison payload for diff mode.
    #[arg(long, requires = "baseline", conflicts_with = "file")]
    comparison: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (dataset, dropped, compared, title) = match (&cli.file, &cli.baseline, &cli.comparison) {
        (Some(file), None, None) => {
            let (dataset, rejected) = load(file)?;
            (dataset, rejected.len(), false, display_name(file))
        }
        (None, Some(baseline_path), Some(comparison_path)) => {
            let (baseline, rejected_base) = load(baseline_path)?;
            let (comparison, rejected_cmp) = load(comparison_path)?;
            let merged = compare_datasets(&baseline, &comparison);
            let title = format!(
                "{} vs {}",
                display_name(baseline_path),
                display_name(comparison_path)
            );
            (
                merged,
                rejected_base.len() + rejected_cmp.len(),
                true,
                title,
            )
        }
        _ => bail!("provide a dataset file, or both --baseline and --comparison"),
    };

    tracing::info!(rows = dataset.len(), dropped, compared, "dataset ready");
    app::run(app::App::new(title, dataset, dropped, compared))
}

fn load(path: &Path) -> Result<(TableDataset, Vec<RejectedRow>)> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    hotseat_core::parse_table_payload(&data)
        .with_context(|| format!("parsing {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
