use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use barowarp_dtw::{
    BandConstraint, CostModel, DEFAULT_ALLOWED_ERROR, DEFAULT_SENSOR_NOISE, Dtw, Reference,
    SamplerConfig,
};
use barowarp_io::{IoError, ScriptRenderer, SeriesReader, Template};

/// Reads a gnuplot template from stdin and writes the rendered script to stdout.
#[derive(Parser)]
#[command(name = "barowarp")]
#[command(about = "Align two barometric curves with banded DTW and emit a gnuplot script")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// First curve CSV (`timestamp_ms,value` per line)
    curve1: PathBuf,

    /// Second curve CSV
    curve2: PathBuf,

    /// Output name passed to the plot fragment
    output_name: String,

    /// Draw one correspondence every this many reference samples (>= 1)
    sample_spacing: i64,

    /// Vertical offset added to the first curve when plotting
    height_offset: f64,

    /// Minimum Sakoe-Chiba half-width (>= 0, widened to the length difference)
    warp_window: i64,

    /// Shift both curves so each starts at timestamp 0
    #[arg(long, default_value_t = false)]
    rebase_timestamps: bool,

    /// Differences below this cost nothing
    #[arg(long, default_value_t = DEFAULT_SENSOR_NOISE)]
    sensor_noise: f64,

    /// Differences above this are penalized quadratically
    #[arg(long, default_value_t = DEFAULT_ALLOWED_ERROR)]
    allowed_error: f64,

    /// Print a JSON run summary to stderr
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

// --- JSON stderr summary ---

#[derive(Serialize)]
struct RunSummary {
    curve1: String,
    curve2: String,
    n1: usize,
    n2: usize,
    warp_window: usize,
    sensor_noise: f64,
    allowed_error: f64,
    total_cost: f64,
    half_width: usize,
    path_len: usize,
    ties: usize,
    reference: &'static str,
    n_correspondences: usize,
}

fn reference_name(reference: Reference) -> &'static str {
    match reference {
        Reference::First => "curve1",
        Reference::Second => "curve2",
    }
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

    // Validate parameters before touching any input
    let constraint =
        BandConstraint::try_from(cli.warp_window).context("invalid warp window")?;
    let sampler = SamplerConfig::from_signed(cli.sample_spacing)
        .context("invalid sample spacing")?
        .with_height_offset(cli.height_offset);
    let cost_model = CostModel::with_thresholds(cli.sensor_noise, cli.allowed_error)
        .context("invalid cost thresholds")?;

    let template = Template::parse(std::io::stdin().lock())
        .context("failed to read gnuplot template from stdin")?;

    let mut first = SeriesReader::new(&cli.curve1)
        .read()
        .context("failed to read first curve")?;
    let mut second = SeriesReader::new(&cli.curve2)
        .read()
        .context("failed to read second curve")?;
    if cli.rebase_timestamps {
        first = first.rebased().context("failed to rebase first curve")?;
        second = second.rebased().context("failed to rebase second curve")?;
        info!("timestamps rebased to zero");
    }

    let dtw = Dtw::from_constraint(constraint).with_cost_model(cost_model);
    let alignment = dtw.align(first.as_view(), second.as_view());
    info!(
        total_cost = %alignment.cost,
        half_width = alignment.half_width,
        path_len = alignment.path.len(),
        ties = alignment.ties,
        "alignment complete"
    );

    let correspondences = sampler
        .sample(&alignment.path, first.as_view(), second.as_view())
        .context("correspondence sampling failed")?;

    let source_1 = cli.curve1.to_string_lossy();
    let source_2 = cli.curve2.to_string_lossy();
    let script = ScriptRenderer::new(&template, &cli.output_name, &source_1, &source_2)
        .render(&correspondences, sampler.height_offset())
        .context("failed to render gnuplot script")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(script.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| IoError::WriteOutput { source: e })?;

    if cli.summary {
        let summary = RunSummary {
            curve1: source_1.into_owned(),
            curve2: source_2.into_owned(),
            n1: first.len(),
            n2: second.len(),
            warp_window: dtw.constraint().min_half_width(),
            sensor_noise: dtw.cost_model().sensor_noise(),
            allowed_error: dtw.cost_model().allowed_error(),
            total_cost: alignment.cost.value(),
            half_width: alignment.half_width,
            path_len: alignment.path.len(),
            ties: alignment.ties,
            reference: reference_name(correspondences.reference()),
            n_correspondences: correspondences.len(),
        };
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
