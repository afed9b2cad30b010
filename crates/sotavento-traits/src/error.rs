//! Error types for the sotavento workspace.
//!
//! All load-time failures are fatal: the simulation either starts with a
//! fully-resolved universe and a validated prediction table, or it does not
//! start at all. There is no retry logic anywhere in the workspace.

use thiserror::Error;

use crate::types::Date;

/// The main error type for sotavento operations.
#[derive(Debug, Error)]
pub enum SotaventoError {
    /// A ticker symbol could not be resolved to an asset identifier.
    #[error("unresolved ticker symbol: {0}")]
    SymbolNotFound(String),

    /// More than one prediction was supplied for the same (asset, date) pair.
    #[error("duplicate prediction for {symbol} on {date}")]
    DuplicatePrediction {
        /// Ticker of the offending asset.
        symbol: String,
        /// Date carrying more than one row.
        date: Date,
    },

    /// A required column is missing from an input file.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid or malformed input data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A date string failed to parse or lies outside the bundle calendar.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Not enough data to run the requested operation.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Error from Polars operations.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error reading or writing a file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing a run record.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<String> for SotaventoError {
    fn from(s: String) -> Self {
        Self::InvalidData(s)
    }
}

impl From<&str> for SotaventoError {
    fn from(s: &str) -> Self {
        Self::InvalidData(s.to_string())
    }
}

/// A specialized Result type for sotavento operations.
pub type Result<T> = std::result::Result<T, SotaventoError>;
