//! Input parsing utilities for the sotavento CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date_str}', expected YYYY-MM-DD"))
}

/// Parse an optional date argument.
pub(crate) fn parse_opt_date(date_str: Option<&str>) -> Result<Option<NaiveDate>> {
    date_str.map(parse_date).transpose()
}
