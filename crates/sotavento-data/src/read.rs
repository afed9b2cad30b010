//! Shared CSV reading and column extraction helpers.

use std::path::Path;

use polars::prelude::*;
use sotavento_traits::{Date, Result, SotaventoError};

/// Reads a headered CSV file into a DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Parses a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| SotaventoError::InvalidDate(format!("{date_str}: {e}")))
}

/// Extracts a string column, erroring on missing column or null rows.
pub(crate) fn column_str(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let col = df
        .column(name)
        .map_err(|_| SotaventoError::MissingColumn(name.to_string()))?;

    col.as_materialized_series()
        .str()?
        .into_iter()
        .map(|v: Option<&str>| {
            v.map(|s| s.to_string())
                .ok_or_else(|| SotaventoError::InvalidData(format!("null value in column {name}")))
        })
        .collect()
}

/// Extracts a numeric column as f64, erroring on missing column or null rows.
pub(crate) fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .map_err(|_| SotaventoError::MissingColumn(name.to_string()))?
        .cast(&DataType::Float64)?;

    col.as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v: Option<f64>| {
            v.ok_or_else(|| SotaventoError::InvalidData(format!("null value in column {name}")))
        })
        .collect()
}
