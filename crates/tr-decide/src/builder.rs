//! Fluent builder for constructing a [`DecisionEngine`].

use tr_core::Tick;
use tr_network::SimulationState;

use crate::{DeadlineHistory, DecideResult, DecisionEngine, DiagnosticsSink, NoopSink, RoutingStrategy};

/// Fluent builder for [`DecisionEngine<S, P, D>`].
///
/// # Required inputs
///
/// - `S: RoutingStrategy`, e.g. [`DeadlineCongestionStrategy`][crate::DeadlineCongestionStrategy]
/// - `P: SimulationState`, e.g. [`tr_network::InMemoryState`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default      |
/// |----------------------|--------------|
/// | `.sink(d)`           | `NoopSink`   |
/// | `.start_tick(t)`     | `Tick(0)`    |
/// | `.expected_ticks(n)` | `0` (history grows on demand) |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(DeadlineCongestionStrategy::new(config), state)
///     .sink(writer)
///     .expected_ticks(3_600)
///     .build()?;
/// let targets = engine.make_decisions(&batch, &network)?;
/// ```
pub struct EngineBuilder<S, P, D = NoopSink> {
    strategy:       S,
    state:          P,
    sink:           D,
    start_tick:     Tick,
    expected_ticks: usize,
}

impl<S: RoutingStrategy, P: SimulationState> EngineBuilder<S, P, NoopSink> {
    pub fn new(strategy: S, state: P) -> Self {
        Self { strategy, state, sink: NoopSink, start_tick: Tick::ZERO, expected_ticks: 0 }
    }
}

impl<S: RoutingStrategy, P: SimulationState, D: DiagnosticsSink> EngineBuilder<S, P, D> {
    /// Replace the diagnostics sink.
    pub fn sink<D2: DiagnosticsSink>(self, sink: D2) -> EngineBuilder<S, P, D2> {
        EngineBuilder {
            strategy:       self.strategy,
            state:          self.state,
            sink,
            start_tick:     self.start_tick,
            expected_ticks: self.expected_ticks,
        }
    }

    /// Index reported for the first decision pass.
    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.start_tick = tick;
        self
    }

    /// Pre-size the deadline history.
    pub fn expected_ticks(mut self, n: usize) -> Self {
        self.expected_ticks = n;
        self
    }

    /// Validate the strategy's parameters and return a ready engine.
    pub fn build(self) -> DecideResult<DecisionEngine<S, P, D>> {
        self.strategy.validate()?;
        Ok(DecisionEngine {
            strategy: self.strategy,
            state:    self.state,
            sink:     self.sink,
            history:  DeadlineHistory::with_capacity(self.expected_ticks),
            tick:     self.start_tick,
        })
    }
}
