//! Externally-computed return predictions.
//!
//! Predictions arrive as a CSV with `symbol,date,score` columns, one row
//! per (asset, date) pair, pre-aligned to the trading calendar by whatever
//! produced them. The table is validated against the bundle universe at
//! load time and immutable afterwards. A missing (asset, date) entry is
//! normal; a duplicate entry, an unknown symbol, or a non-finite score
//! fails the load.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::Array1;
use polars::prelude::DataFrame;
use tracing::info;

use sotavento_traits::{Date, Result, SotaventoError, Universe};

use crate::read::{column_f64, column_str, parse_date, read_csv};

/// Per-(asset, date) predicted returns for the full backtest horizon.
#[derive(Debug, Clone)]
pub struct PredictionTable {
    /// Day views aligned to universe index order; NaN marks a missing
    /// prediction for that asset on that day.
    by_day: BTreeMap<Date, Array1<f64>>,
    rows: usize,
}

impl PredictionTable {
    /// Loads a prediction table from a CSV file with `symbol,date,score`
    /// columns, validating every row against `universe`.
    ///
    /// # Errors
    ///
    /// Fails on I/O or parse errors, missing columns, a symbol outside the
    /// universe, a duplicate (asset, date) row, or a non-finite score.
    pub fn from_csv_path(path: impl AsRef<Path>, universe: &Universe) -> Result<Self> {
        let df = read_csv(path.as_ref())?;
        let table = Self::from_dataframe(&df, universe)?;
        info!(
            path = %path.as_ref().display(),
            rows = table.rows,
            days = table.by_day.len(),
            "loaded prediction table"
        );
        Ok(table)
    }

    /// Builds a table from an in-memory DataFrame with the same schema as
    /// [`from_csv_path`](Self::from_csv_path), with dates as `YYYY-MM-DD`
    /// strings.
    pub fn from_dataframe(df: &DataFrame, universe: &Universe) -> Result<Self> {
        let symbols = column_str(df, "symbol")?;
        let dates = column_str(df, "date")?
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<Date>>>()?;
        let scores = column_f64(df, "score")?;

        let n_assets = universe.len();
        let mut by_day: BTreeMap<Date, Array1<f64>> = BTreeMap::new();

        for ((symbol, date), score) in symbols.iter().zip(&dates).zip(&scores) {
            if !score.is_finite() {
                return Err(SotaventoError::InvalidData(format!(
                    "non-finite score for {symbol} on {date}"
                )));
            }

            let asset = universe.resolve(symbol)?;
            let day = by_day
                .entry(*date)
                .or_insert_with(|| Array1::from_elem(n_assets, f64::NAN));

            if day[asset.index()].is_finite() {
                return Err(SotaventoError::DuplicatePrediction {
                    symbol: symbol.clone(),
                    date: *date,
                });
            }
            day[asset.index()] = *score;
        }

        Ok(Self {
            by_day,
            rows: symbols.len(),
        })
    }

    /// Day view of predictions, aligned to universe index order, or `None`
    /// if no asset has a prediction on `date`.
    #[must_use]
    pub fn scores_on(&self, date: Date) -> Option<&Array1<f64>> {
        self.by_day.get(&date)
    }

    /// Dates with at least one prediction, ascending.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.by_day.keys().copied()
    }

    /// First date with a prediction.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.by_day.keys().next().copied()
    }

    /// Last date with a prediction.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.by_day.keys().next_back().copied()
    }

    /// Total number of prediction rows loaded.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of assets with a prediction on `date`.
    #[must_use]
    pub fn coverage_on(&self, date: Date) -> usize {
        self.by_day
            .get(&date)
            .map_or(0, |day| day.iter().filter(|s| s.is_finite()).count())
    }
}
