#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Input loading for the sotavento backtest driver.
//!
//! Two inputs exist, both read once at startup and immutable afterwards:
//!
//! - the **price bundle** ([`PriceBundle`]) — pre-ingested daily close
//!   prices, which also supplies the ticker universe and the trading
//!   calendar,
//! - the **prediction table** ([`PredictionTable`]) — externally-computed
//!   per-(asset, date) return predictions, validated against the bundle
//!   universe at load time.
//!
//! Both load from CSV files; in-memory `DataFrame` constructors exist for
//! tests and demos. Any validation failure aborts the load — there is no
//! per-row recovery.

pub mod bundle;
pub mod predictions;
mod read;

pub use bundle::PriceBundle;
pub use predictions::PredictionTable;
