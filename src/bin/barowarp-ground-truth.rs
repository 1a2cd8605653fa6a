use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use barowarp_dtw::ground_truth;
use barowarp_io::SeriesReader;

/// Picks the recording that spans the shortest time and prints its path.
///
/// The chosen curve is the one the others of the same trip get aligned against.
#[derive(Parser)]
#[command(name = "barowarp-ground-truth")]
#[command(about = "Select the shortest barometric recording as the alignment ground truth")]
#[command(version)]
struct Cli {
    /// Candidate curve CSVs (`timestamp_ms,value` per line)
    #[arg(required = true)]
    candidates: Vec<PathBuf>,

    /// Print a JSON summary of every candidate to stderr
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Serialize)]
struct CandidateSummary {
    path: String,
    duration_ms: f64,
}

#[derive(Serialize)]
struct GroundTruthSummary {
    ground_truth: String,
    duration_ms: f64,
    candidates: Vec<CandidateSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let series = cli
        .candidates
        .iter()
        .map(|path| {
            SeriesReader::new(path)
                .read()
                .with_context(|| format!("failed to read candidate {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let chosen = ground_truth(&series).context("no candidates given")?;
    let path = cli.candidates[chosen].to_string_lossy();
    info!(
        ground_truth = %path,
        duration_ms = series[chosen].duration_ms(),
        n_candidates = series.len(),
        "ground truth selected"
    );
    println!("{path}");

    if cli.summary {
        let summary = GroundTruthSummary {
            ground_truth: path.clone().into_owned(),
            duration_ms: series[chosen].duration_ms(),
            candidates: cli
                .candidates
                .iter()
                .zip(&series)
                .map(|(p, s)| CandidateSummary {
                    path: p.to_string_lossy().into_owned(),
                    duration_ms: s.duration_ms(),
                })
                .collect(),
        };
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
