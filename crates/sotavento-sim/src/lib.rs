#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Daily simulation loop for sotavento.
//!
//! The [`Simulation`] driver walks the bundle calendar one trading day at a
//! time, strictly after that day's predictions are available, and runs the
//! selection and allocation stages with an explicit day-scoped state record
//! — there is no ambient mutable context carried between days beyond the
//! previously-held asset set the driver owns. Instructions flow to an
//! [`ExecutionHandler`](sotavento_traits::ExecutionHandler); the in-repo
//! implementation is the [`FrictionlessBook`], which applies target weights
//! at the close and marks to market with next-day returns, with no order
//! matching, commissions, or slippage.

pub mod book;
pub mod driver;
pub mod report;

pub use book::FrictionlessBook;
pub use driver::{RunStats, Simulation, SimulationConfig};
pub use report::JsonReportSink;
