use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use upi_insights::config::{format_delimiter, parse_delimiter, EngineConfig};
use upi_insights::context::build_context;
use upi_insights::engine::InsightEngine;
use upi_insights::execution::{ExecutionEngine, TracingExecutionObserver};
use upi_insights::ingestion::{CompositeObserver, FileObserver, SourceFormat, TracingObserver};
use upi_insights::store::RowStore;

/// Query a UPI transaction dataset and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "upi-insights", version, about)]
struct Cli {
    /// Dataset path (overrides $UPI_INSIGHTS_DATA)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Source format: csv, tsv, json, ndjson, parquet (default: inferred from the extension)
    #[arg(long)]
    format: Option<String>,

    /// Field delimiter for delimited sources, e.g. ';' or 'tab'
    #[arg(long)]
    delimiter: Option<String>,

    /// Worker threads for row scans (default: rayon's global pool)
    #[arg(long)]
    threads: Option<usize>,

    /// Also append load events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Whole-dataset summary
    Summary,
    /// Failure breakdown by network, device, bank and merchant category
    Failures {
        /// Only consider transactions between 18:00 and 22:59
        #[arg(long)]
        peak_only: bool,
    },
    /// Success rates by age group and device
    Segments {
        #[arg(long)]
        transaction_type: Option<String>,
        #[arg(long)]
        min_amount: Option<f64>,
    },
    /// Per-state statistics and worst state/bank corridors
    Regions {
        #[arg(long)]
        transaction_type: Option<String>,
        #[arg(long)]
        weekend_only: bool,
    },
    /// Hourly, daily and per-type amount trends
    Trends,
    /// Classify a question and print the data block assembled for it
    Context { question: String },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let mut observers = CompositeObserver::default().with(TracingObserver);
    if let Some(path) = &cli.log_file {
        observers = observers.with(FileObserver::new(path));
    }
    let mut load = config.load.clone();
    load.observer = Some(Arc::new(observers));

    let exec = ExecutionEngine::new(config.execution.clone())?
        .with_observer(Arc::new(TracingExecutionObserver));
    let store = RowStore::load(&config.data_path, &load)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    let engine = InsightEngine::new(Arc::new(store), exec);

    match &cli.command {
        Command::Summary => print_json(&engine.get_summary(), cli.compact)?,
        Command::Failures { peak_only } => {
            print_json(&engine.get_failure_analysis(*peak_only), cli.compact)?
        }
        Command::Segments {
            transaction_type,
            min_amount,
        } => print_json(
            &engine.get_success_rate_by_segment(transaction_type.as_deref(), *min_amount),
            cli.compact,
        )?,
        Command::Regions {
            transaction_type,
            weekend_only,
        } => print_json(
            &engine.get_regional_analysis(transaction_type.as_deref(), *weekend_only),
            cli.compact,
        )?,
        Command::Trends => print_json(&engine.get_transaction_trends(), cli.compact)?,
        Command::Context { question } => {
            println!("{}", build_context(&engine, question).render(question)?);
        }
    }

    tracing::debug!(metrics = %engine.execution().metrics().snapshot(), "execution metrics");
    Ok(())
}

/// Environment settings first, then command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env()?;
    if let Some(path) = &cli.data {
        config.data_path = path.clone();
    }
    if let Some(raw) = &cli.format {
        config.load.format = Some(SourceFormat::from_str(raw)?);
        if let Some(tab) = format_delimiter(raw) {
            config.load.delimiter = Some(tab);
        }
    }
    if let Some(raw) = &cli.delimiter {
        let delimiter = parse_delimiter(raw)
            .with_context(|| format!("invalid delimiter '{raw}': expected one ASCII character"))?;
        config.load.delimiter = Some(delimiter);
    }
    if let Some(n) = cli.threads {
        config.execution.num_threads = Some(n);
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}
