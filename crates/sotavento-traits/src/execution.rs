//! Execution seam for target-weight instructions.
//!
//! The daily allocator does not place orders, track fills, or manage cash.
//! It emits one "set target weight" instruction per affected asset to an
//! [`ExecutionHandler`], which owns everything downstream of that contract:
//! translating weights into orders, fills, commissions, slippage. The
//! frictionless book in `sotavento-sim` is the in-repo implementation; a
//! richer execution model plugs in behind the same trait.

use ndarray::Array1;

use crate::error::Result;
use crate::types::{AssetId, Date};

/// Consumer of daily target-weight instructions.
///
/// The simulation clock drives a handler through three calls per trading
/// day, always in the same order:
///
/// 1. [`mark`](Self::mark) — realize the day's per-asset returns against the
///    positions carried into the day,
/// 2. [`set_target_weight`](Self::set_target_weight) — zero or more
///    instructions from the allocator, effective at that day's close,
/// 3. [`close_day`](Self::close_day) — the day is complete; snapshot state.
///
/// Implementations must be `Send` so a run can be moved across threads, but
/// no concurrent invocation ever occurs: the driver is single-threaded and
/// each day runs to completion before the next begins.
pub trait ExecutionHandler: Send {
    /// Realizes one trading day of per-asset returns.
    ///
    /// `asset_returns` is aligned to universe index order; entries may be
    /// `NaN` for assets without a price that day, which must contribute
    /// zero to the portfolio return.
    fn mark(&mut self, date: Date, asset_returns: &Array1<f64>) -> Result<()>;

    /// Accepts one target-weight instruction, effective at the close of `date`.
    ///
    /// `weight` is a signed fraction of portfolio value in [-1, 1]; zero
    /// means flatten the position.
    fn set_target_weight(&mut self, date: Date, asset: AssetId, weight: f64) -> Result<()>;

    /// Marks the end of the trading day after all instructions were issued.
    fn close_day(&mut self, date: Date) -> Result<()>;
}
