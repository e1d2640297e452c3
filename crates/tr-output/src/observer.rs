//! `SinkOutput<W>` — bridges `DiagnosticsSink` to an `OutputWriter`.

use log::warn;

use tr_core::{Tick, VehicleId};
use tr_decide::{DiagnosticsSink, SkipReason, TickSample};

use crate::row::{DeadlineRow, SkipRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DiagnosticsSink`] that records the deadline series and skipped
/// vehicles through any [`OutputWriter`] backend.
///
/// Skips arrive before their tick's sample and are written together with it.
/// Errors from the writer are stored because sink methods have no return
/// value; check [`take_error`][Self::take_error] after the run.
pub struct SinkOutput<W: OutputWriter> {
    writer:        W,
    pending_skips: Vec<SkipRow>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SinkOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending_skips: Vec::new(), last_error: None }
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("diagnostics write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn flush_skips(&mut self) {
        if self.pending_skips.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending_skips);
        let result = self.writer.write_skips(&rows);
        self.store_err(result);
    }
}

impl<W: OutputWriter> DiagnosticsSink for SinkOutput<W> {
    fn on_tick(&mut self, sample: &TickSample) {
        self.flush_skips();
        let result = self.writer.write_deadline(&DeadlineRow::from(sample));
        self.store_err(result);
    }

    fn on_skip(&mut self, tick: Tick, vehicle: &VehicleId, reason: &SkipReason) {
        self.pending_skips.push(SkipRow::new(tick, vehicle, reason));
    }

    fn on_run_end(&mut self) {
        self.flush_skips();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
