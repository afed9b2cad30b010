//! Sotavento CLI binary.
//!
//! Provides the command-line interface for running prediction-driven
//! long/short backtests.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sotavento")]
#[command(about = "Daily long/short backtests from predicted returns", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest
    Run {
        /// Price bundle CSV with symbol,date,close columns
        #[arg(short, long)]
        bundle: PathBuf,

        /// Prediction table CSV with symbol,date,score columns
        #[arg(short, long)]
        predictions: PathBuf,

        /// Start date (YYYY-MM-DD, defaults to the first bundle date)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, defaults to the last bundle date)
        #[arg(long)]
        end: Option<String>,

        /// Maximum number of long positions
        #[arg(long, default_value = "25")]
        longs: usize,

        /// Maximum number of short positions
        #[arg(long, default_value = "25")]
        shorts: usize,

        /// Minimum positions required on both sides before trading
        #[arg(long, default_value = "10")]
        min_positions: usize,

        /// Starting capital
        #[arg(long, default_value = "1000000")]
        capital: f64,

        /// Write the run record (returns, positions, transactions) as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a prediction table against a bundle and show coverage
    Inspect {
        /// Price bundle CSV with symbol,date,close columns
        #[arg(short, long)]
        bundle: PathBuf,

        /// Prediction table CSV with symbol,date,score columns
        #[arg(short, long)]
        predictions: PathBuf,
    },

    /// List the resolved asset universe of a bundle
    Universe {
        /// Price bundle CSV with symbol,date,close columns
        #[arg(short, long)]
        bundle: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            bundle,
            predictions,
            start,
            end,
            longs,
            shorts,
            min_positions,
            capital,
            output,
            format,
        } => cmd::run::run_backtest(&cmd::run::RunArgs {
            bundle,
            predictions,
            start,
            end,
            longs,
            shorts,
            min_positions,
            capital,
            output,
            format,
        }),
        Commands::Inspect {
            bundle,
            predictions,
        } => cmd::inspect::inspect(&bundle, &predictions),
        Commands::Universe { bundle } => cmd::universe::list_universe(&bundle),
    }
}
