//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DeadlineRow, OutputResult, SkipRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`SinkOutput`][crate::SinkOutput] and retrieved with
/// [`take_error`][crate::SinkOutput::take_error].
pub trait OutputWriter {
    /// Append one row to the deadline series.
    fn write_deadline(&mut self, row: &DeadlineRow) -> OutputResult<()>;

    /// Append a batch of skipped vehicles.
    fn write_skips(&mut self, rows: &[SkipRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
