//! Frictionless execution book.
//!
//! The book is the in-repo implementation of the execution seam: it applies
//! each target-weight instruction immediately at that day's close and earns
//! `weight × next-day simple return` per held asset, compounding an equity
//! curve. Order matching, partial fills, commission, and slippage are out
//! of scope; a richer execution model replaces this type behind the same
//! [`ExecutionHandler`] trait.

use std::collections::BTreeSet;

use ndarray::Array1;

use sotavento_traits::{
    AssetId, Date, ExecutionHandler, Position, PositionSnapshot, Result, RunRecord,
    SotaventoError, Transaction, Universe,
};

/// Target-weight book with frictionless accounting.
#[derive(Debug, Clone)]
pub struct FrictionlessBook {
    universe: Universe,
    initial_capital: f64,
    equity: f64,
    /// Current signed weights, aligned to universe index order.
    weights: Array1<f64>,
    dates: Vec<Date>,
    returns: Vec<f64>,
    equity_curve: Vec<f64>,
    positions: Vec<PositionSnapshot>,
    transactions: Vec<Transaction>,
}

impl FrictionlessBook {
    /// Creates an empty book over `universe` with the given starting capital.
    #[must_use]
    pub fn new(universe: Universe, initial_capital: f64) -> Self {
        let n = universe.len();
        Self {
            universe,
            initial_capital,
            equity: initial_capital,
            weights: Array1::zeros(n),
            dates: Vec::new(),
            returns: Vec::new(),
            equity_curve: Vec::new(),
            positions: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Current portfolio equity.
    #[must_use]
    pub const fn equity(&self) -> f64 {
        self.equity
    }

    /// Assets currently held with a non-zero weight.
    #[must_use]
    pub fn held(&self) -> BTreeSet<AssetId> {
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(i, _)| AssetId::new(i as u32))
            .collect()
    }

    /// Number of instructions accepted so far.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Consumes the book and produces the run record for reporting.
    #[must_use]
    pub fn into_record(self) -> RunRecord {
        RunRecord {
            dates: self.dates,
            returns: self.returns,
            equity: self.equity_curve,
            positions: self.positions,
            transactions: self.transactions,
            initial_capital: self.initial_capital,
        }
    }
}

impl ExecutionHandler for FrictionlessBook {
    fn mark(&mut self, date: Date, asset_returns: &Array1<f64>) -> Result<()> {
        if asset_returns.len() != self.weights.len() {
            return Err(SotaventoError::InvalidData(format!(
                "return vector has {} entries, universe has {}",
                asset_returns.len(),
                self.weights.len()
            )));
        }

        // Missing returns contribute zero for that asset.
        let day_return: f64 = self
            .weights
            .iter()
            .zip(asset_returns.iter())
            .filter(|(w, r)| **w != 0.0 && r.is_finite())
            .map(|(w, r)| w * r)
            .sum();

        self.equity *= 1.0 + day_return;
        self.dates.push(date);
        self.returns.push(day_return);
        self.equity_curve.push(self.equity);
        Ok(())
    }

    fn set_target_weight(&mut self, date: Date, asset: AssetId, weight: f64) -> Result<()> {
        if !weight.is_finite() || !(-1.0..=1.0).contains(&weight) {
            return Err(SotaventoError::InvalidData(format!(
                "target weight {weight} for {} out of [-1, 1]",
                self.universe.symbol(asset)
            )));
        }

        let previous_weight = self.weights[asset.index()];
        self.transactions.push(Transaction {
            date,
            asset,
            previous_weight,
            target_weight: weight,
        });
        self.weights[asset.index()] = weight;
        Ok(())
    }

    fn close_day(&mut self, date: Date) -> Result<()> {
        let positions = self
            .weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(i, &w)| {
                let asset = AssetId::new(i as u32);
                Position {
                    asset,
                    symbol: self.universe.symbol(asset).to_string(),
                    weight: w,
                }
            })
            .collect();

        self.positions.push(PositionSnapshot { date, positions });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn date(day: u32) -> Date {
        Date::from_ymd_opt(2020, 1, day).unwrap()
    }

    fn book() -> FrictionlessBook {
        FrictionlessBook::new(Universe::from_symbols(["A", "B", "C"]), 100_000.0)
    }

    #[test]
    fn test_mark_before_any_weights_is_flat() {
        let mut book = book();
        book.mark(date(2), &array![0.1, -0.2, 0.05]).unwrap();
        assert_relative_eq!(book.equity(), 100_000.0);
    }

    #[test]
    fn test_weights_earn_next_day_returns() {
        let mut book = book();
        book.mark(date(2), &array![0.0, 0.0, 0.0]).unwrap();
        book.set_target_weight(date(2), AssetId::new(0), 0.5).unwrap();
        book.set_target_weight(date(2), AssetId::new(1), -0.5).unwrap();
        book.close_day(date(2)).unwrap();

        // Long earns +10%, short earns +10% on a -10% move.
        book.mark(date(3), &array![0.10, -0.10, 0.0]).unwrap();
        assert_relative_eq!(book.equity(), 110_000.0, epsilon = 1e-6);

        let record = book.into_record();
        assert_eq!(record.returns.len(), 2);
        assert_relative_eq!(record.returns[0], 0.0);
        assert_relative_eq!(record.returns[1], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_return_contributes_zero() {
        let mut book = book();
        book.set_target_weight(date(2), AssetId::new(0), 1.0).unwrap();
        book.mark(date(3), &array![f64::NAN, 0.1, 0.1]).unwrap();
        assert_relative_eq!(book.equity(), 100_000.0);
    }

    #[test]
    fn test_flatten_removes_from_held() {
        let mut book = book();
        book.set_target_weight(date(2), AssetId::new(0), 0.5).unwrap();
        book.set_target_weight(date(2), AssetId::new(2), -0.5).unwrap();
        assert_eq!(book.held().len(), 2);

        book.set_target_weight(date(3), AssetId::new(0), 0.0).unwrap();
        let held = book.held();
        assert_eq!(held.len(), 1);
        assert!(held.contains(&AssetId::new(2)));
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let mut book = book();
        assert!(book.set_target_weight(date(2), AssetId::new(0), 1.5).is_err());
        assert!(book
            .set_target_weight(date(2), AssetId::new(0), f64::NAN)
            .is_err());
    }

    #[test]
    fn test_mismatched_return_vector_rejected() {
        let mut book = book();
        assert!(book.mark(date(2), &array![0.1]).is_err());
    }

    #[test]
    fn test_snapshot_lists_nonzero_positions_in_id_order() {
        let mut book = book();
        book.set_target_weight(date(2), AssetId::new(2), -0.5).unwrap();
        book.set_target_weight(date(2), AssetId::new(0), 0.5).unwrap();
        book.close_day(date(2)).unwrap();

        let record = book.into_record();
        let snapshot = &record.positions[0];
        assert_eq!(snapshot.positions.len(), 2);
        assert_eq!(snapshot.positions[0].symbol, "A");
        assert_relative_eq!(snapshot.positions[0].weight, 0.5);
        assert_eq!(snapshot.positions[1].symbol, "C");
    }

    #[test]
    fn test_every_instruction_is_recorded() {
        let mut book = book();
        book.set_target_weight(date(2), AssetId::new(0), 0.5).unwrap();
        book.set_target_weight(date(3), AssetId::new(0), 0.5).unwrap();
        book.set_target_weight(date(4), AssetId::new(0), 0.0).unwrap();
        assert_eq!(book.transaction_count(), 3);

        let record = book.into_record();
        assert_relative_eq!(record.transactions[2].previous_weight, 0.5);
        assert_relative_eq!(record.transactions[2].target_weight, 0.0);
    }
}
