//! Pre-ingested daily price bundle.
//!
//! The bundle is the source of truth for three things resolved once at
//! startup: the ticker universe, the trading calendar, and the per-asset
//! daily return series the frictionless book marks against. Input is a CSV
//! with `symbol,date,close` columns, one row per asset-day bar.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::Array1;
use polars::prelude::DataFrame;
use tracing::info;

use sotavento_traits::{AssetId, Date, Result, SotaventoError, Universe};

use crate::read::{column_f64, column_str, parse_date, read_csv};

/// Historical close prices for a fixed universe over a fixed calendar.
///
/// Prices and derived returns are stored as one vector per trading day,
/// aligned to universe index order, with `NaN` marking days on which an
/// asset has no bar.
#[derive(Debug, Clone)]
pub struct PriceBundle {
    universe: Universe,
    calendar: Vec<Date>,
    date_index: BTreeMap<Date, usize>,
    /// closes[t][i] = close of asset i on calendar[t]; NaN when absent.
    closes: Vec<Array1<f64>>,
    /// returns[t][i] = closes[t][i] / closes[t-1][i] - 1; NaN when either
    /// side is absent. returns[0] is all-NaN.
    returns: Vec<Array1<f64>>,
}

impl PriceBundle {
    /// Loads a bundle from a CSV file with `symbol,date,close` columns.
    ///
    /// # Errors
    ///
    /// Fails on I/O or parse errors, missing columns, duplicate bars,
    /// non-finite or non-positive closes, or an empty file. All failures
    /// are fatal; the run does not start on a partial bundle.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let df = read_csv(path.as_ref())?;
        let bundle = Self::from_dataframe(&df)?;
        info!(
            path = %path.as_ref().display(),
            assets = bundle.universe.len(),
            days = bundle.calendar.len(),
            "loaded price bundle"
        );
        Ok(bundle)
    }

    /// Builds a bundle from an in-memory DataFrame with the same schema as
    /// [`from_csv_path`](Self::from_csv_path), with dates as `YYYY-MM-DD`
    /// strings.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let symbols = column_str(df, "symbol")?;
        let dates = column_str(df, "date")?
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<Date>>>()?;
        let closes_raw = column_f64(df, "close")?;

        if symbols.is_empty() {
            return Err(SotaventoError::InsufficientData(
                "price bundle contains no rows".to_string(),
            ));
        }

        let universe = Universe::from_symbols(symbols.iter().cloned());

        let mut calendar: Vec<Date> = dates.clone();
        calendar.sort();
        calendar.dedup();

        let date_index: BTreeMap<Date, usize> =
            calendar.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let n_assets = universe.len();
        let mut closes = vec![Array1::from_elem(n_assets, f64::NAN); calendar.len()];

        for ((symbol, date), close) in symbols.iter().zip(&dates).zip(&closes_raw) {
            if !close.is_finite() || *close <= 0.0 {
                return Err(SotaventoError::InvalidData(format!(
                    "invalid close {close} for {symbol} on {date}"
                )));
            }

            let asset = universe.resolve(symbol)?;
            let t = date_index[date];
            if closes[t][asset.index()].is_finite() {
                return Err(SotaventoError::InvalidData(format!(
                    "duplicate bar for {symbol} on {date}"
                )));
            }
            closes[t][asset.index()] = *close;
        }

        let returns = compute_returns(&closes, n_assets);

        Ok(Self {
            universe,
            calendar,
            date_index,
            closes,
            returns,
        })
    }

    /// The resolved asset universe.
    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The trading calendar, ascending.
    #[must_use]
    pub fn calendar(&self) -> &[Date] {
        &self.calendar
    }

    /// Calendar dates within `[start, end]`, either bound optional.
    pub fn calendar_window(&self, start: Option<Date>, end: Option<Date>) -> Vec<Date> {
        self.calendar
            .iter()
            .copied()
            .filter(|d| start.is_none_or(|s| *d >= s) && end.is_none_or(|e| *d <= e))
            .collect()
    }

    /// Per-asset simple returns realized on `date`, aligned to universe
    /// order. `None` if the date is not on the calendar.
    #[must_use]
    pub fn returns_on(&self, date: Date) -> Option<&Array1<f64>> {
        self.date_index.get(&date).map(|&t| &self.returns[t])
    }

    /// Per-asset closes on `date`, aligned to universe order.
    #[must_use]
    pub fn closes_on(&self, date: Date) -> Option<&Array1<f64>> {
        self.date_index.get(&date).map(|&t| &self.closes[t])
    }

    /// First and last calendar date on which an asset has a bar.
    #[must_use]
    pub fn coverage(&self, asset: AssetId) -> Option<(Date, Date)> {
        let first = self
            .calendar
            .iter()
            .zip(&self.closes)
            .find(|(_, row)| row[asset.index()].is_finite())
            .map(|(d, _)| *d)?;
        let last = self
            .calendar
            .iter()
            .zip(&self.closes)
            .rev()
            .find(|(_, row)| row[asset.index()].is_finite())
            .map(|(d, _)| *d)?;
        Some((first, last))
    }
}

fn compute_returns(closes: &[Array1<f64>], n_assets: usize) -> Vec<Array1<f64>> {
    let mut returns = vec![Array1::from_elem(n_assets, f64::NAN); closes.len()];
    for t in 1..closes.len() {
        for i in 0..n_assets {
            let prev = closes[t - 1][i];
            let cur = closes[t][i];
            if prev.is_finite() && cur.is_finite() {
                returns[t][i] = cur / prev - 1.0;
            }
        }
    }
    returns
}
