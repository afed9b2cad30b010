#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Core type and trait definitions for the sotavento backtest driver.
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace: asset identity and universe resolution, the workspace
//! error enum, the execution seam the daily allocator talks to, and the run
//! record handed to reporting consumers after a simulation ends.

/// The version of the sotavento-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod execution;
pub mod record;
pub mod types;

// Re-exports
pub use error::{Result, SotaventoError};
pub use execution::ExecutionHandler;
pub use record::{Position, PositionSnapshot, ReportSink, RunRecord, Transaction};
pub use types::{AssetId, Date, Symbol, Universe};
