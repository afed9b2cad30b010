//! The daily simulation driver.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sotavento_data::{PredictionTable, PriceBundle};
use sotavento_portfolio::{Allocator, AllocatorConfig, DailySelection, Selector, SelectorConfig};
use sotavento_traits::{AssetId, Date, ExecutionHandler, Result, SotaventoError};

/// Configuration for one simulation run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// First trading day to simulate; `None` starts at the bundle's first
    /// calendar date.
    pub start: Option<Date>,
    /// Last trading day to simulate; `None` runs to the bundle's last
    /// calendar date.
    pub end: Option<Date>,
    /// Selection parameters.
    pub selector: SelectorConfig,
    /// Allocation parameters.
    pub allocator: AllocatorConfig,
}

/// Counters describing a completed run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Trading days simulated.
    pub days: usize,
    /// Days on which the minimum-position gate fired and new weights were
    /// issued.
    pub rebalances: usize,
    /// Days with no prediction for any asset.
    pub days_without_predictions: usize,
    /// Target-weight instructions emitted to the execution handler.
    pub instructions: usize,
}

/// Drives the selection and allocation stages over the bundle calendar.
///
/// The driver is single-threaded and cooperative: each day runs to
/// completion — mark to market, select, allocate, emit instructions, close
/// — before the next begins, strictly after that day's predictions are
/// available in the pre-loaded table. The only state carried between days
/// is the previously-held asset set, owned here and passed into the
/// allocator explicitly each day.
#[derive(Debug)]
pub struct Simulation<'a> {
    bundle: &'a PriceBundle,
    predictions: &'a PredictionTable,
    selector: Selector,
    allocator: Allocator,
    window: Vec<Date>,
}

impl<'a> Simulation<'a> {
    /// Creates a simulation over the bundle calendar restricted to the
    /// configured date window.
    ///
    /// # Errors
    ///
    /// Fails if the position-count parameters are inconsistent (all must be
    /// positive and `min_positions` must not exceed either side's maximum)
    /// or if the date window contains no trading days.
    pub fn new(
        bundle: &'a PriceBundle,
        predictions: &'a PredictionTable,
        config: SimulationConfig,
    ) -> Result<Self> {
        let SelectorConfig { n_longs, n_shorts } = config.selector;
        let AllocatorConfig { min_positions } = config.allocator;

        if n_longs == 0 || n_shorts == 0 || min_positions == 0 {
            return Err(SotaventoError::InvalidData(
                "position counts must be positive".to_string(),
            ));
        }
        if min_positions > n_longs.min(n_shorts) {
            return Err(SotaventoError::InvalidData(format!(
                "min_positions {min_positions} exceeds smaller side maximum {}",
                n_longs.min(n_shorts)
            )));
        }

        let window = bundle.calendar_window(config.start, config.end);
        if window.is_empty() {
            return Err(SotaventoError::InsufficientData(
                "no trading days in the requested window".to_string(),
            ));
        }

        Ok(Self {
            bundle,
            predictions,
            selector: Selector::new(config.selector),
            allocator: Allocator::new(config.allocator),
            window,
        })
    }

    /// Trading days this simulation will iterate, ascending.
    #[must_use]
    pub fn days(&self) -> &[Date] {
        &self.window
    }

    /// Runs the full simulation against an execution handler.
    ///
    /// For each trading day, in order: the handler marks to market with the
    /// day's per-asset returns, the day's predictions are ranked and
    /// allocated, one instruction per affected asset is emitted, and the
    /// day closes. Days without predictions select nothing, which flattens
    /// every held position.
    pub fn run<E: ExecutionHandler>(&self, handler: &mut E) -> Result<RunStats> {
        let mut held: BTreeSet<AssetId> = BTreeSet::new();
        let mut stats = RunStats::default();

        info!(
            days = self.window.len(),
            first = %self.window[0],
            last = %self.window[self.window.len() - 1],
            universe = self.bundle.universe().len(),
            "starting simulation"
        );

        for &date in &self.window {
            let returns = self.bundle.returns_on(date).ok_or_else(|| {
                SotaventoError::InvalidDate(format!("{date} missing from bundle calendar"))
            })?;
            handler.mark(date, returns)?;

            let selection = match self.predictions.scores_on(date) {
                Some(scores) => self.selector.select(scores),
                None => {
                    warn!(%date, "no predictions for day");
                    stats.days_without_predictions += 1;
                    DailySelection::default()
                }
            };

            let allocation = self.allocator.allocate(&selection, &held);
            if allocation.values().any(|w| *w != 0.0) {
                stats.rebalances += 1;
            }

            for (&asset, &weight) in &allocation {
                handler.set_target_weight(date, asset, weight)?;
                stats.instructions += 1;
                if weight == 0.0 {
                    held.remove(&asset);
                } else {
                    held.insert(asset);
                }
            }

            handler.close_day(date)?;
            stats.days += 1;

            debug!(
                %date,
                longs = selection.longs.len(),
                shorts = selection.shorts.len(),
                instructions = allocation.len(),
                "day complete"
            );
        }

        info!(
            days = stats.days,
            rebalances = stats.rebalances,
            instructions = stats.instructions,
            "simulation complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::FrictionlessBook;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn date(day: u32) -> Date {
        Date::from_ymd_opt(2020, 1, day).unwrap()
    }

    /// Four assets over three days. A and B trend up, C and D trend down.
    fn bundle() -> PriceBundle {
        let df = df! {
            "symbol" => &["A", "B", "C", "D",
                          "A", "B", "C", "D",
                          "A", "B", "C", "D"],
            "date" => &["2020-01-02", "2020-01-02", "2020-01-02", "2020-01-02",
                        "2020-01-03", "2020-01-03", "2020-01-03", "2020-01-03",
                        "2020-01-06", "2020-01-06", "2020-01-06", "2020-01-06"],
            "close" => &[100.0, 100.0, 100.0, 100.0,
                         110.0, 100.0, 90.0, 100.0,
                         121.0, 100.0, 81.0, 100.0],
        }
        .unwrap();
        PriceBundle::from_dataframe(&df).unwrap()
    }

    fn predictions(bundle: &PriceBundle, rows: &[(&str, &str, f64)]) -> PredictionTable {
        let df = df! {
            "symbol" => rows.iter().map(|(s, _, _)| *s).collect::<Vec<_>>(),
            "date" => rows.iter().map(|(_, d, _)| *d).collect::<Vec<_>>(),
            "score" => rows.iter().map(|(_, _, v)| *v).collect::<Vec<_>>(),
        }
        .unwrap();
        PredictionTable::from_dataframe(&df, bundle.universe()).unwrap()
    }

    fn config(n: usize, min: usize) -> SimulationConfig {
        SimulationConfig {
            start: None,
            end: None,
            selector: SelectorConfig {
                n_longs: n,
                n_shorts: n,
            },
            allocator: AllocatorConfig { min_positions: min },
        }
    }

    #[test]
    fn test_rejects_inconsistent_position_counts() {
        let bundle = bundle();
        let preds = predictions(&bundle, &[("A", "2020-01-02", 0.1)]);

        assert!(Simulation::new(&bundle, &preds, config(0, 1)).is_err());
        assert!(Simulation::new(&bundle, &preds, config(2, 3)).is_err());
        assert!(Simulation::new(&bundle, &preds, config(2, 1)).is_ok());
    }

    #[test]
    fn test_rejects_empty_window() {
        let bundle = bundle();
        let preds = predictions(&bundle, &[("A", "2020-01-02", 0.1)]);
        let cfg = SimulationConfig {
            start: Some(date(10)),
            ..config(2, 1)
        };
        assert!(matches!(
            Simulation::new(&bundle, &preds, cfg),
            Err(SotaventoError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_full_run_compounds_selected_returns() {
        let bundle = bundle();
        // Same predictions every day: long A and B, short C and D.
        let preds = predictions(
            &bundle,
            &[
                ("A", "2020-01-02", 0.05),
                ("B", "2020-01-02", 0.03),
                ("C", "2020-01-02", -0.04),
                ("D", "2020-01-02", -0.02),
                ("A", "2020-01-03", 0.05),
                ("B", "2020-01-03", 0.03),
                ("C", "2020-01-03", -0.04),
                ("D", "2020-01-03", -0.02),
                ("A", "2020-01-06", 0.05),
                ("B", "2020-01-06", 0.03),
                ("C", "2020-01-06", -0.04),
                ("D", "2020-01-06", -0.02),
            ],
        );

        let sim = Simulation::new(&bundle, &preds, config(2, 1)).unwrap();
        let mut book = FrictionlessBook::new(bundle.universe().clone(), 100_000.0);
        let stats = sim.run(&mut book).unwrap();

        assert_eq!(stats.days, 3);
        assert_eq!(stats.rebalances, 3);
        assert_eq!(stats.days_without_predictions, 0);

        let record = book.into_record();
        // Day 1: no weights carried in, flat.
        assert_relative_eq!(record.returns[0], 0.0);
        // Day 2: +0.5*10% on A, -0.5*(-10%) on C.
        assert_relative_eq!(record.returns[1], 0.10, epsilon = 1e-12);
        // Day 3: same book, same moves.
        assert_relative_eq!(record.returns[2], 0.10, epsilon = 1e-12);
        assert_relative_eq!(record.final_equity(), 121_000.0, epsilon = 1e-6);

        // End-of-day snapshots carry the four selected names.
        assert_eq!(record.positions[0].positions.len(), 4);
    }

    #[test]
    fn test_dropped_asset_is_flattened_next_day() {
        let bundle = bundle();
        // A is long on day one, then vanishes from the predictions.
        let preds = predictions(
            &bundle,
            &[
                ("A", "2020-01-02", 0.05),
                ("B", "2020-01-02", 0.03),
                ("C", "2020-01-02", -0.04),
                ("D", "2020-01-02", -0.02),
                ("B", "2020-01-03", 0.03),
                ("C", "2020-01-03", -0.04),
            ],
        );

        let sim = Simulation::new(&bundle, &preds, config(2, 1)).unwrap();
        let mut book = FrictionlessBook::new(bundle.universe().clone(), 100_000.0);
        sim.run(&mut book).unwrap();

        let record = book.into_record();
        let a = bundle.universe().resolve("A").unwrap();

        // Day two's gate fails (1 long is not > 1), so the only instructions
        // are flattens for A and D; B and C keep their day-one weights.
        let day_two: Vec<_> = record
            .transactions
            .iter()
            .filter(|t| t.date == date(3))
            .collect();
        assert_eq!(day_two.len(), 2);
        assert!(day_two.iter().all(|t| t.target_weight == 0.0));
        assert!(day_two.iter().any(|t| t.asset == a));

        let day_two_positions = &record.positions[1];
        let symbols: Vec<&str> = day_two_positions
            .positions
            .iter()
            .map(|p| p.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["B", "C"]);
    }

    #[test]
    fn test_day_without_predictions_flattens_everything() {
        let bundle = bundle();
        let preds = predictions(
            &bundle,
            &[
                ("A", "2020-01-02", 0.05),
                ("B", "2020-01-02", 0.03),
                ("C", "2020-01-02", -0.04),
                ("D", "2020-01-02", -0.02),
            ],
        );

        let sim = Simulation::new(&bundle, &preds, config(2, 1)).unwrap();
        let mut book = FrictionlessBook::new(bundle.universe().clone(), 100_000.0);
        let stats = sim.run(&mut book).unwrap();

        assert_eq!(stats.days_without_predictions, 2);

        let record = book.into_record();
        // All four positions flattened on day two.
        assert!(record.positions[1].positions.is_empty());
        // Nothing held, nothing to instruct on day three.
        assert!(record
            .transactions
            .iter()
            .all(|t| t.date != date(6)));
    }

    #[test]
    fn test_gate_never_fires_stays_flat() {
        let bundle = bundle();
        // Only one name per side, min_positions 1: 1 is not > 1.
        let preds = predictions(
            &bundle,
            &[("A", "2020-01-02", 0.05), ("C", "2020-01-02", -0.04)],
        );

        let sim = Simulation::new(&bundle, &preds, config(2, 1)).unwrap();
        let mut book = FrictionlessBook::new(bundle.universe().clone(), 100_000.0);
        let stats = sim.run(&mut book).unwrap();

        assert_eq!(stats.rebalances, 0);
        assert_eq!(stats.instructions, 0);

        let record = book.into_record();
        assert!(record.returns.iter().all(|r| *r == 0.0));
        assert_relative_eq!(record.final_equity(), 100_000.0);
    }
}
