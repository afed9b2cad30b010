//! JSON report sink.
//!
//! Writes the completed run record to disk as pretty-printed JSON for
//! downstream tear-sheet tooling. The record is raw material only —
//! returns, equity, positions, transactions — with no statistics attached.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::info;

use sotavento_traits::{ReportSink, Result, RunRecord, SotaventoError};

/// Report sink that serializes the run record to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ReportSink for JsonReportSink {
    fn publish(&mut self, record: &RunRecord) -> Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), record)
            .map_err(|e| SotaventoError::Serialization(e.to_string()))?;
        info!(path = %self.path.display(), days = record.days(), "run record written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sotavento_traits::Date;

    #[test]
    fn test_publish_writes_json() {
        let dir = std::env::temp_dir().join("sotavento-report-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.json");

        let record = RunRecord {
            dates: vec![Date::from_ymd_opt(2020, 1, 2).unwrap()],
            returns: vec![0.01],
            equity: vec![101_000.0],
            positions: vec![],
            transactions: vec![],
            initial_capital: 100_000.0,
        };

        let mut sink = JsonReportSink::new(&path);
        sink.publish(&record).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("2020-01-02"));
        assert!(text.contains("initial_capital"));

        std::fs::remove_file(&path).unwrap();
    }
}
