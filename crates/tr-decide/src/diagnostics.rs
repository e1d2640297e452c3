//! Per-tick diagnostics: the sink trait and the mean-deadline history.

use tr_core::{Tick, VehicleId};

use crate::SkipReason;

/// Summary of one decision pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSample {
    /// Decision pass index, starting at the engine's start tick.
    pub tick:          Tick,
    /// Simulated time of the snapshot, in seconds.
    pub time_secs:     f64,
    /// Vehicles in the batch.
    pub vehicles:      usize,
    /// Mean batch deadline (0 for an empty batch).
    pub mean_deadline: f64,
    /// Vehicles whose target came from the fallback policy.
    pub fallbacks:     usize,
    /// Vehicles that got no target.
    pub skipped:       usize,
}

/// Callbacks invoked by [`DecisionEngine`][crate::DecisionEngine] after each
/// decision pass.
///
/// All methods default to no-ops.  Output writers implement this to record
/// the deadline series without the engine knowing any file format.
pub trait DiagnosticsSink {
    /// Called once per successful decision pass.
    fn on_tick(&mut self, _sample: &TickSample) {}

    /// Called for every vehicle that received no target.
    fn on_skip(&mut self, _tick: Tick, _vehicle: &VehicleId, _reason: &SkipReason) {}

    /// Called once by [`DecisionEngine::finish`][crate::DecisionEngine::finish].
    fn on_run_end(&mut self) {}
}

impl<D: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut D {
    fn on_tick(&mut self, sample: &TickSample) {
        (**self).on_tick(sample)
    }

    fn on_skip(&mut self, tick: Tick, vehicle: &VehicleId, reason: &SkipReason) {
        (**self).on_skip(tick, vehicle, reason)
    }

    fn on_run_end(&mut self) {
        (**self).on_run_end()
    }
}

/// A [`DiagnosticsSink`] that discards everything.
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {}

// ── DeadlineHistory ───────────────────────────────────────────────────────────

/// `(simulated seconds, mean deadline)` per decision pass, in call order.
#[derive(Debug, Clone, Default)]
pub struct DeadlineHistory {
    points: Vec<(f64, f64)>,
}

impl DeadlineHistory {
    pub fn with_capacity(n: usize) -> Self {
        Self { points: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, time_secs: f64, mean_deadline: f64) {
        self.points.push((time_secs, mean_deadline));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
