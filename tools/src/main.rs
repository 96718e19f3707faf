//! dataset-gen: headless runner for the synthetic fraud dataset.
//!
//! Usage:
//!   dataset-gen --rows 100000
//!   dataset-gen --rows 5000 --seed 7 --as-of 2025-06-30 --format sqlite
//!   dataset-gen --config run.json --out-dir data/01_raw

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, ValueEnum};
use mulesim_core::{
    config::{GeneratorConfig, OutputFormat},
    engine::generate,
    sink::{CsvSink, DatasetSink, SqliteSink},
    store::SimStore,
    summary::DatasetSummary,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dataset-gen")]
#[command(about = "Generate a labelled synthetic transaction dataset", long_about = None)]
struct Cli {
    /// Number of transaction rows to generate.
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Reference "now" (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS).
    #[arg(long)]
    as_of: Option<String>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// JSON run config; flags override its values.
    #[arg(long)]
    config: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Sqlite,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Sqlite => OutputFormat::Sqlite,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    println!("mulesim — dataset-gen");
    println!("  rows:    {}", config.target_rows);
    println!("  seed:    {}", config.seed);
    println!("  as_of:   {}", config.as_of);
    println!("  out_dir: {}", config.output.dir);
    println!();

    // Generate fully in memory first; nothing is written on failure.
    let dataset = generate(&config).context("generation failed, no output written")?;

    let mut sink: Box<dyn DatasetSink> = match config.output.format {
        OutputFormat::Csv => Box::new(CsvSink::new(&config.output.dir)),
        OutputFormat::Sqlite => {
            std::fs::create_dir_all(&config.output.dir)?;
            let db_path = PathBuf::from(&config.output.dir).join(&config.output.db_file);
            let store = SimStore::open(&db_path.to_string_lossy())?;
            let run_id = format!("run-{}-{}", config.seed, uuid::Uuid::new_v4());
            Box::new(SqliteSink::new(store, run_id, env!("CARGO_PKG_VERSION")))
        }
    };
    sink.write(&dataset)
        .with_context(|| format!("writing {} output", sink.name()))?;
    log::info!("{} sink finished", sink.name());

    print_summary(&DatasetSummary::from_dataset(&dataset));
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.target_rows = rows;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(as_of) = &cli.as_of {
        config.as_of = parse_as_of(as_of)?;
    }
    if let Some(dir) = &cli.out_dir {
        config.output.dir = dir.to_string_lossy().into_owned();
    }
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    config.validate()?;
    Ok(config)
}

fn parse_as_of(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .with_context(|| format!("invalid --as-of '{raw}'"))
}

fn print_summary(s: &DatasetSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  transactions:   {} (target {})", s.transactions, s.target_rows);
    println!("  accounts:       {}", s.accounts);
    println!("  mules:          {}", s.mules);
    println!("  bosses:         {}", s.bosses);
    println!("  honest:         {}", s.honest);
    println!("  normal steps:   {}", s.normal_steps);
    println!("  fraud cycles:   {}", s.fraud_cycle_steps);
    println!("  noise pairs:    {}", s.noise_steps);
    println!("  total volume:   {:.2}", s.total_volume);
    println!("  fraud volume:   {:.2} ({:.1}%)", s.fraud_volume, s.fraud_volume_share() * 100.0);
}
