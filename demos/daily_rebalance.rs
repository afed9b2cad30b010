//! Daily rebalance demo on an in-memory bundle.
//!
//! This example demonstrates:
//! - Building a price bundle and prediction table without any input files
//! - Running the daily selection/allocation loop against the frictionless book
//! - Reading returns, positions, and transactions out of the run record

use polars::prelude::*;
use sotavento::prelude::*;
use sotavento::portfolio::{AllocatorConfig, SelectorConfig};

/// Tiny demo universe.
const SYMBOLS: &[&str] = &["ALTA", "BRAVA", "CRUZ", "DUNA", "ESTE", "FARO"];

/// Portfolio constraints: two names per side, at least one per side.
const N_LONGS: usize = 2;
const N_SHORTS: usize = 2;
const MIN_POSITIONS: usize = 1;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> sotavento::Result<()> {
    let bundle = PriceBundle::from_dataframe(&prices())?;
    let predictions = PredictionTable::from_dataframe(&predictions_frame(), bundle.universe())?;

    let config = SimulationConfig {
        start: None,
        end: None,
        selector: SelectorConfig {
            n_longs: N_LONGS,
            n_shorts: N_SHORTS,
        },
        allocator: AllocatorConfig {
            min_positions: MIN_POSITIONS,
        },
    };

    let sim = Simulation::new(&bundle, &predictions, config)?;
    let mut book = FrictionlessBook::new(bundle.universe().clone(), 100_000.0);
    let stats = sim.run(&mut book)?;

    let record = book.into_record();

    println!("\nDaily Rebalance Demo");
    println!("════════════════════");
    println!(
        "Universe:   {} assets, {} trading days",
        bundle.universe().len(),
        stats.days
    );
    println!("Rebalances: {}", stats.rebalances);
    println!();

    println!("Daily returns and equity:");
    for ((date, ret), equity) in record
        .dates
        .iter()
        .zip(record.returns.iter())
        .zip(record.equity.iter())
    {
        println!("  {date}  {ret:>8.4}  {equity:>12.2}");
    }
    println!();

    println!("Final positions:");
    if let Some(snapshot) = record.positions.last() {
        for position in &snapshot.positions {
            println!("  {:<6} {:>7.3}", position.symbol, position.weight);
        }
    }
    println!();
    println!("{} instructions issued in total", record.transactions.len());

    Ok(())
}

/// Five trading days of synthetic closes with two trending pairs.
fn prices() -> DataFrame {
    let dates = [
        "2024-03-04",
        "2024-03-05",
        "2024-03-06",
        "2024-03-07",
        "2024-03-08",
    ];
    // One close per symbol per day; winners drift up, losers drift down.
    let paths: &[&[f64]] = &[
        &[100.0, 102.0, 104.0, 106.5, 109.0], // ALTA
        &[50.0, 50.5, 50.2, 50.8, 51.0],      // BRAVA
        &[80.0, 78.5, 77.0, 76.0, 74.5],      // CRUZ
        &[120.0, 119.0, 120.5, 119.5, 120.0], // DUNA
        &[30.0, 30.3, 30.9, 31.2, 31.8],      // ESTE
        &[65.0, 63.8, 62.5, 61.9, 60.7],      // FARO
    ];

    let mut symbols = Vec::new();
    let mut date_col = Vec::new();
    let mut closes = Vec::new();
    for (symbol, path) in SYMBOLS.iter().zip(paths) {
        for (date, close) in dates.iter().zip(path.iter()) {
            symbols.push(*symbol);
            date_col.push(*date);
            closes.push(*close);
        }
    }

    df! {
        "symbol" => symbols,
        "date" => date_col,
        "close" => closes,
    }
    .expect("demo frame")
}

/// Predictions that favour the trending pairs, thinning out on the last day.
fn predictions_frame() -> DataFrame {
    let rows: &[(&str, &str, f64)] = &[
        ("ALTA", "2024-03-04", 0.021),
        ("ESTE", "2024-03-04", 0.012),
        ("CRUZ", "2024-03-04", -0.018),
        ("FARO", "2024-03-04", -0.011),
        ("ALTA", "2024-03-05", 0.019),
        ("ESTE", "2024-03-05", 0.010),
        ("CRUZ", "2024-03-05", -0.016),
        ("FARO", "2024-03-05", -0.013),
        ("ALTA", "2024-03-06", 0.017),
        ("BRAVA", "2024-03-06", 0.004),
        ("CRUZ", "2024-03-06", -0.015),
        ("FARO", "2024-03-06", -0.009),
        ("ALTA", "2024-03-07", 0.020),
        ("ESTE", "2024-03-07", 0.008),
        ("CRUZ", "2024-03-07", -0.017),
        ("FARO", "2024-03-07", -0.010),
        // Final day: only one side qualifies, the gate stays shut.
        ("ALTA", "2024-03-08", 0.015),
    ];

    df! {
        "symbol" => rows.iter().map(|(s, _, _)| *s).collect::<Vec<_>>(),
        "date" => rows.iter().map(|(_, d, _)| *d).collect::<Vec<_>>(),
        "score" => rows.iter().map(|(_, _, v)| *v).collect::<Vec<_>>(),
    }
    .expect("demo frame")
}
