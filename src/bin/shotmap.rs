//! Heatmap tool - build a shot heatmap payload from per-match shot charts
//!
//! Reads a JSON array of matches (`[{"match_id": "...", "shots": [{x, y, made}]}]`)
//! or, with `--points`, an array of already-mapped `{x, y, value}` points, and
//! writes the renderer payload to stdout.
//!
//! Usage:
//!   cargo run --bin shotmap -- shots.json
//!   cargo run --bin shotmap -- shots.json --match 1042 --match 1047
//!   cargo run --bin shotmap -- shots.json --format csv --size 400
//!   cat points.json | cargo run --bin shotmap -- - --points
//!   cargo run --bin shotmap -- shots.json --settings config/shotmap.toml

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use shotmap::{
    DEFAULT_SETTINGS_FILE, HeatmapData, HeatmapPipeline, HeatmapSettings, MatchShots, ShotPoint,
    init_logging, init_parallel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `{min, max, width, height, data: [{x, y, value}]}`
    Json,
    /// `x,y,value` lines
    Csv,
}

#[derive(Parser)]
#[command(
    name = "shotmap",
    about = "Build a smoothed shot-location heatmap grid",
    version
)]
struct Cli {
    /// Input JSON file, or `-` for stdin
    input: PathBuf,

    /// Settings file (TOML); defaults are used if it does not exist
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Only include these match ids (repeatable); all matches when omitted
    #[arg(long = "match", value_name = "ID")]
    matches: Vec<String>,

    /// Input is already-mapped `{x, y, value}` points instead of match shot charts
    #[arg(long)]
    points: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Grid resolution (overrides settings; defaults to the court width)
    #[arg(long)]
    size: Option<usize>,

    /// Distance-decay exponent (overrides settings)
    #[arg(long)]
    power: Option<f64>,

    /// Smoothing/search radius (overrides settings)
    #[arg(long)]
    radius: Option<f64>,

    /// Rayon worker threads, 0 = auto (overrides settings)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    init_logging(&settings.logging);
    init_parallel(settings.threads)?;
    info!(
        "Settings: power={}, radius={}, grid={}x{}",
        settings.power,
        settings.smoothing_radius,
        settings.grid_dims().width,
        settings.grid_dims().height
    );

    let pipeline = HeatmapPipeline::from_settings(&settings)?;
    let input = read_input(&cli.input)?;

    let data = if cli.points {
        if !cli.matches.is_empty() {
            warn!("--match is ignored with --points");
        }
        let points: Vec<ShotPoint> =
            serde_json::from_str(&input).context("Failed to parse point list")?;
        pipeline.run(&points)?
    } else {
        let matches: Vec<MatchShots> =
            serde_json::from_str(&input).context("Failed to parse match shot charts")?;
        pipeline.run_matches(&matches, &cli.matches)?
    };

    if data.is_empty() {
        info!("No shots to render");
    } else {
        info!("Heatmap has {} non-zero cells", data.data.len());
    }

    write_output(&data, cli.format)
}

fn load_settings(cli: &Cli) -> Result<HeatmapSettings> {
    let mut settings = HeatmapSettings::load_or_default(&cli.settings)
        .with_context(|| format!("Failed to load {}", cli.settings.display()))?;

    if let Some(size) = cli.size {
        settings.grid_size = Some(size);
        settings.grid_width = None;
        settings.grid_height = None;
    }
    if let Some(power) = cli.power {
        settings.power = power;
    }
    if let Some(radius) = cli.radius {
        settings.smoothing_radius = radius;
    }
    if let Some(threads) = cli.threads {
        settings.threads = threads;
    }
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }

    settings.validate()?;
    Ok(settings)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(data: &HeatmapData, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, data)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => out.write_all(data.to_csv().as_bytes())?,
    }
    out.flush()?;
    Ok(())
}
