//! The `DecisionEngine` and its per-tick entry point.

use log::debug;

use tr_core::{Tick, Vehicle};
use tr_network::{NetworkSnapshot, RoadNetwork, SimulationState};

use crate::{
    DeadlineHistory, DecideResult, Decisions, DiagnosticsSink, NoopSink, RoutingStrategy,
    TargetMap, TickSample, mean_deadline,
};

/// Owns a routing strategy, the simulation-state provider, and the
/// diagnostics sink, and turns a batch of vehicles into targets once per
/// tick.
///
/// The engine keeps no per-tick state besides the deadline history: each call
/// captures a fresh [`NetworkSnapshot`] from the provider and drops it before
/// returning.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct DecisionEngine<S, P, D = NoopSink> {
    pub(crate) strategy: S,
    pub(crate) state:    P,
    pub(crate) sink:     D,
    pub(crate) history:  DeadlineHistory,
    pub(crate) tick:     Tick,
}

impl<S, P, D> DecisionEngine<S, P, D>
where
    S: RoutingStrategy,
    P: SimulationState,
    D: DiagnosticsSink,
{
    /// Choose a local target for every routable vehicle in `batch`.
    ///
    /// Vehicles on an unknown edge are left out of the map (and reported to
    /// the sink).  Unreachable destinations get a fallback target.
    ///
    /// # Errors
    ///
    /// [`DecideError::Network`][crate::DecideError::Network] if the snapshot
    /// is malformed.  Nothing is recorded for a failed tick.
    pub fn make_decisions(
        &mut self,
        batch:   &[Vehicle],
        network: &RoadNetwork,
    ) -> DecideResult<TargetMap> {
        self.decide(batch, network).map(|d| d.targets)
    }

    /// Like [`make_decisions`][Self::make_decisions] but returns the full
    /// [`Decisions`], including fallbacks and skips.
    pub fn decide(&mut self, batch: &[Vehicle], network: &RoadNetwork) -> DecideResult<Decisions> {
        let snapshot = NetworkSnapshot::capture(network, &self.state);
        let decisions = self.strategy.compute_decisions(batch, &snapshot)?;
        debug_assert!(decisions.targets.len() + decisions.skipped.len() <= batch.len());

        let mean = mean_deadline(batch);
        self.history.push(snapshot.time_secs(), mean);

        for (vehicle, reason) in &decisions.skipped {
            self.sink.on_skip(self.tick, vehicle, reason);
        }

        let sample = TickSample {
            tick:          self.tick,
            time_secs:     snapshot.time_secs(),
            vehicles:      batch.len(),
            mean_deadline: mean,
            fallbacks:     decisions.fallbacks.len(),
            skipped:       decisions.skipped.len(),
        };
        self.sink.on_tick(&sample);

        debug!(
            "{} tick {} (t={:.1}s): {} vehicles, mean deadline {:.2}, {} fallbacks, {} skipped",
            self.strategy.name(), sample.tick, sample.time_secs, sample.vehicles,
            sample.mean_deadline, sample.fallbacks, sample.skipped,
        );

        self.tick = self.tick + 1;
        Ok(decisions)
    }

    /// Mean-deadline series recorded so far.
    pub fn history(&self) -> &DeadlineHistory {
        &self.history
    }

    /// Index of the next decision pass.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn state(&self) -> &P {
        &self.state
    }

    /// Mutable access for drivers that update the provider between ticks.
    pub fn state_mut(&mut self) -> &mut P {
        &mut self.state
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Notify the sink that the run is over.
    pub fn finish(&mut self) {
        self.sink.on_run_end();
    }

    /// Tear down into strategy, provider, sink, and history.
    pub fn into_parts(self) -> (S, P, D, DeadlineHistory) {
        (self.strategy, self.state, self.sink, self.history)
    }
}
