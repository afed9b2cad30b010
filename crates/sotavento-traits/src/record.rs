//! Run record handed to reporting consumers.
//!
//! A completed simulation produces the raw time series a downstream
//! analytics tool needs for tear-sheet reporting: daily portfolio returns,
//! the equity curve, end-of-day position snapshots, and every target-weight
//! instruction issued. No performance statistics are computed here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AssetId, Date, Symbol};

/// One target-weight instruction as recorded by the execution handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Trading day the instruction was issued.
    pub date: Date,
    /// Asset the instruction applies to.
    pub asset: AssetId,
    /// Weight held before the instruction.
    pub previous_weight: f64,
    /// Target weight after the instruction; zero flattens the position.
    pub target_weight: f64,
}

/// A single held position inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Asset identifier.
    pub asset: AssetId,
    /// Ticker symbol, included for readable output.
    pub symbol: Symbol,
    /// Signed portfolio weight.
    pub weight: f64,
}

/// End-of-day portfolio state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Trading day the snapshot was taken at the close of.
    pub date: Date,
    /// Non-zero positions, in asset identifier order.
    pub positions: Vec<Position>,
}

/// The full output of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Simulated trading days in ascending order.
    pub dates: Vec<Date>,
    /// Daily portfolio returns, aligned to `dates`.
    pub returns: Vec<f64>,
    /// Portfolio equity after each day, aligned to `dates`.
    pub equity: Vec<f64>,
    /// End-of-day position snapshots, aligned to `dates`.
    pub positions: Vec<PositionSnapshot>,
    /// Every target-weight instruction issued during the run.
    pub transactions: Vec<Transaction>,
    /// Starting capital.
    pub initial_capital: f64,
}

impl RunRecord {
    /// Number of simulated trading days.
    #[must_use]
    pub fn days(&self) -> usize {
        self.dates.len()
    }

    /// Portfolio equity after the final day, or the initial capital for an
    /// empty run.
    #[must_use]
    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(self.initial_capital)
    }
}

/// Consumer of a completed run.
///
/// The reporting collaborator receives the record exactly once, after the
/// simulation ends. Tear sheets, Sharpe ratios, and drawdown analysis are
/// its business, not this workspace's.
pub trait ReportSink {
    /// Publishes a completed run record.
    fn publish(&mut self, record: &RunRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RunRecord {
        RunRecord {
            dates: vec![Date::from_ymd_opt(2020, 1, 2).unwrap()],
            returns: vec![0.01],
            equity: vec![101_000.0],
            positions: vec![PositionSnapshot {
                date: Date::from_ymd_opt(2020, 1, 2).unwrap(),
                positions: vec![Position {
                    asset: AssetId::new(0),
                    symbol: "AAPL".to_string(),
                    weight: 0.5,
                }],
            }],
            transactions: vec![],
            initial_capital: 100_000.0,
        }
    }

    #[test]
    fn test_run_record_accessors() {
        let record = record();
        assert_eq!(record.days(), 1);
        assert!((record.final_equity() - 101_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_record_final_equity() {
        let record = RunRecord {
            dates: vec![],
            returns: vec![],
            equity: vec![],
            positions: vec![],
            transactions: vec![],
            initial_capital: 50_000.0,
        };
        assert!((record.final_equity() - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_serializes() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains("AAPL"));
        assert!(json.contains("2020-01-02"));
    }
}
