//! Inspect command implementation.

use std::path::Path;

use anyhow::Result;

use sotavento_data::{PredictionTable, PriceBundle};

/// Validate a prediction table against a bundle and print coverage facts.
pub(crate) fn inspect(bundle_path: &Path, predictions_path: &Path) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Prediction Inspection                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let bundle = PriceBundle::from_csv_path(bundle_path)?;
    let predictions = PredictionTable::from_csv_path(predictions_path, bundle.universe())?;

    println!("Universe:     {} assets", bundle.universe().len());
    println!("Calendar:     {} trading days", bundle.calendar().len());
    println!("Predictions:  {} rows", predictions.rows());

    match (predictions.first_date(), predictions.last_date()) {
        (Some(first), Some(last)) => println!("Date range:   {first} to {last}"),
        _ => println!("Date range:   (empty)"),
    }
    println!();

    let coverage: Vec<usize> = predictions
        .dates()
        .map(|d| predictions.coverage_on(d))
        .collect();

    if coverage.is_empty() {
        println!("No prediction days found.");
    } else {
        let min = coverage.iter().min().copied().unwrap_or(0);
        let max = coverage.iter().max().copied().unwrap_or(0);
        let covered_days = coverage.len();
        let uncovered_days = bundle
            .calendar()
            .iter()
            .filter(|d| predictions.scores_on(**d).is_none())
            .count();

        println!("Per-day coverage:");
        println!("  Days with predictions:    {covered_days:>6}");
        println!("  Calendar days without:    {uncovered_days:>6}");
        println!("  Min assets covered/day:   {min:>6}");
        println!("  Max assets covered/day:   {max:>6}");
    }
    println!();
    println!("Prediction table is valid against this bundle.");
    println!();

    Ok(())
}
