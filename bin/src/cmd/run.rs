//! Run command implementation.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use sotavento_data::{PredictionTable, PriceBundle};
use sotavento_portfolio::{AllocatorConfig, SelectorConfig};
use sotavento_sim::{FrictionlessBook, JsonReportSink, RunStats, Simulation, SimulationConfig};
use sotavento_traits::ReportSink;

use crate::data::parse_opt_date;

/// Arguments for the `run` subcommand.
pub(crate) struct RunArgs {
    pub(crate) bundle: PathBuf,
    pub(crate) predictions: PathBuf,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) longs: usize,
    pub(crate) shorts: usize,
    pub(crate) min_positions: usize,
    pub(crate) capital: f64,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: String,
}

#[derive(Serialize)]
struct RunSummary {
    stats: RunStats,
    initial_capital: f64,
    final_equity: f64,
}

/// Run a full backtest and report a summary.
pub(crate) fn run_backtest(args: &RunArgs) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Backtest Run                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Bundle:        {}", args.bundle.display());
    println!("Predictions:   {}", args.predictions.display());
    println!(
        "Positions:     {} long / {} short (min {} per side)",
        args.longs, args.shorts, args.min_positions
    );
    println!("Capital:       {:.2}", args.capital);
    println!();

    let bundle = PriceBundle::from_csv_path(&args.bundle)?;
    let predictions = PredictionTable::from_csv_path(&args.predictions, bundle.universe())?;

    println!(
        "Loaded {} assets over {} trading days, {} prediction rows",
        bundle.universe().len(),
        bundle.calendar().len(),
        predictions.rows()
    );
    println!();

    let config = SimulationConfig {
        start: parse_opt_date(args.start.as_deref())?,
        end: parse_opt_date(args.end.as_deref())?,
        selector: SelectorConfig {
            n_longs: args.longs,
            n_shorts: args.shorts,
        },
        allocator: AllocatorConfig {
            min_positions: args.min_positions,
        },
    };

    let sim = Simulation::new(&bundle, &predictions, config)?;
    println!(
        "Simulating {} trading days ({} to {})...",
        sim.days().len(),
        sim.days()[0],
        sim.days()[sim.days().len() - 1]
    );
    println!();

    let mut book = FrictionlessBook::new(bundle.universe().clone(), args.capital);
    let stats = sim.run(&mut book)?;

    let final_equity = book.equity();
    let record = book.into_record();

    if let Some(ref path) = args.output {
        let mut sink = JsonReportSink::new(path.clone());
        sink.publish(&record)?;
        println!("Run record written to {}", path.display());
        println!();
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("RUN SUMMARY");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if args.format == "json" {
        let summary = RunSummary {
            stats,
            initial_capital: args.capital,
            final_equity,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("  Days simulated:       {:>10}", stats.days);
        println!("  Rebalances:           {:>10}", stats.rebalances);
        println!("  Instructions issued:  {:>10}", stats.instructions);
        println!(
            "  Days w/o predictions: {:>10}",
            stats.days_without_predictions
        );
        println!();
        println!("  Initial capital:      {:>14.2}", args.capital);
        println!("  Final equity:         {:>14.2}", final_equity);
        println!();
        println!("Returns, positions, and transactions are in the run record;");
        println!("use --output to write it for tear-sheet tooling.");
    }
    println!();

    Ok(())
}
