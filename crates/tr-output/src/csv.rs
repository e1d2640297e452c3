//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `deadline_series.csv`
//! - `skipped_vehicles.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DeadlineRow, OutputResult, SkipRow};

pub const DEADLINE_FILE: &str = "deadline_series.csv";
pub const SKIPS_FILE: &str = "skipped_vehicles.csv";

/// Writes diagnostics to two CSV files.
pub struct CsvWriter {
    series:   Writer<File>,
    skips:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) both files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut series = Writer::from_path(dir.join(DEADLINE_FILE))?;
        series.write_record(["tick", "time_secs", "vehicles", "mean_deadline", "fallbacks", "skipped"])?;

        let mut skips = Writer::from_path(dir.join(SKIPS_FILE))?;
        skips.write_record(["tick", "vehicle_id", "edge"])?;

        Ok(Self { series, skips, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_deadline(&mut self, row: &DeadlineRow) -> OutputResult<()> {
        self.series.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.vehicles.to_string(),
            row.mean_deadline.to_string(),
            row.fallbacks.to_string(),
            row.skipped.to_string(),
        ])?;
        Ok(())
    }

    fn write_skips(&mut self, rows: &[SkipRow]) -> OutputResult<()> {
        for row in rows {
            self.skips.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.clone(),
                row.edge.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.series.flush()?;
        self.skips.flush()?;
        Ok(())
    }
}
