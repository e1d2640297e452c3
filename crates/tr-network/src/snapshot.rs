//! Per-tick network snapshots and the simulation-state capability.
//!
//! The driver owns the live simulator.  The planner only sees it through the
//! small [`SimulationState`] trait, so routing can be exercised against
//! [`InMemoryState`] in tests instead of a running simulator process.
//!
//! A [`NetworkSnapshot`] pairs the static [`RoadNetwork`] with occupancy
//! counts copied out of the state provider at the start of a tick.  It is
//! built fresh every tick and must not outlive it: occupancy is stale as soon
//! as the simulator advances.

use rustc_hash::FxHashMap;

use tr_core::{EdgeId, SimClock};

use crate::{NetworkError, NetworkResult, RoadNetwork};

// ── SimulationState ───────────────────────────────────────────────────────────

/// Live simulator queries needed by the planner.
pub trait SimulationState {
    /// Current simulated time in seconds.
    fn sim_time_secs(&self) -> f64;

    /// Vehicles currently on `edge`.  Unknown edges report 0.
    fn vehicle_count(&self, edge: EdgeId) -> u32;
}

// ── InMemoryState ─────────────────────────────────────────────────────────────

/// A [`SimulationState`] backed by a clock and a sparse count table.
#[derive(Debug, Clone)]
pub struct InMemoryState {
    pub clock: SimClock,
    counts:    FxHashMap<EdgeId, u32>,
}

impl InMemoryState {
    pub fn new(clock: SimClock) -> Self {
        Self { clock, counts: FxHashMap::default() }
    }

    /// Overwrite the count on `edge`.
    pub fn set_count(&mut self, edge: EdgeId, count: u32) {
        if count == 0 {
            self.counts.remove(&edge);
        } else {
            self.counts.insert(edge, count);
        }
    }

    /// One more vehicle entered `edge`.
    pub fn enter(&mut self, edge: EdgeId) {
        *self.counts.entry(edge).or_insert(0) += 1;
    }

    /// One vehicle left `edge`.  Counts never drop below zero.
    pub fn leave(&mut self, edge: EdgeId) {
        if let Some(c) = self.counts.get_mut(&edge) {
            *c = c.saturating_sub(1);
            if *c == 0 {
                self.counts.remove(&edge);
            }
        }
    }

    /// Forget all counts (e.g. before re-populating from a vehicle list).
    pub fn clear_counts(&mut self) {
        self.counts.clear();
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) {
        self.clock.advance();
    }
}

impl SimulationState for InMemoryState {
    fn sim_time_secs(&self) -> f64 {
        self.clock.time_secs()
    }

    fn vehicle_count(&self, edge: EdgeId) -> u32 {
        self.counts.get(&edge).copied().unwrap_or(0)
    }
}

// ── NetworkSnapshot ───────────────────────────────────────────────────────────

/// Static topology plus the occupancy counts valid for one tick.
///
/// Cloning a snapshot copies only the occupancy table; strategies use a clone
/// as a tick-local working copy when projecting the capacity that earlier
/// vehicles claim.
#[derive(Clone)]
pub struct NetworkSnapshot<'a> {
    network:   &'a RoadNetwork,
    occupancy: Vec<u32>,
    time_secs: f64,
}

impl<'a> NetworkSnapshot<'a> {
    /// Copy the live occupancy of every edge out of `state`.
    pub fn capture<S: SimulationState + ?Sized>(network: &'a RoadNetwork, state: &S) -> Self {
        let occupancy = (0..network.edge_count())
            .map(|i| state.vehicle_count(EdgeId(i as u32)))
            .collect();
        Self { network, occupancy, time_secs: state.sim_time_secs() }
    }

    /// Build a snapshot from a dense count table indexed by `EdgeId`.
    pub fn from_counts(
        network:   &'a RoadNetwork,
        occupancy: Vec<u32>,
        time_secs: f64,
    ) -> NetworkResult<Self> {
        if occupancy.len() != network.edge_count() {
            return Err(NetworkError::OccupancyMismatch {
                expected: network.edge_count(),
                got:      occupancy.len(),
            });
        }
        Ok(Self { network, occupancy, time_secs })
    }

    /// A snapshot with zero vehicles on every edge.
    pub fn free_flow(network: &'a RoadNetwork) -> Self {
        Self { network, occupancy: vec![0; network.edge_count()], time_secs: 0.0 }
    }

    /// Builder-style occupancy override, mostly for tests and fixtures.
    /// Unknown edges are ignored.
    pub fn with_occupancy(mut self, edge: EdgeId, count: u32) -> Self {
        if let Some(slot) = self.occupancy.get_mut(edge.index()) {
            *slot = count;
        }
        self
    }

    #[inline]
    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    #[inline]
    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    /// Vehicles on `edge` (0 for unknown edges).
    #[inline]
    pub fn occupancy(&self, edge: EdgeId) -> u32 {
        self.occupancy.get(edge.index()).copied().unwrap_or(0)
    }

    /// Length of `edge`, rejecting unknown edges and lengths that are not
    /// strictly positive (NaN included).
    pub fn valid_length(&self, edge: EdgeId) -> NetworkResult<f64> {
        let length = self.network.length(edge).ok_or(NetworkError::UnknownEdge(edge))?;
        if length > 0.0 && length.is_finite() {
            Ok(length)
        } else {
            Err(NetworkError::InvalidEdgeLength { edge, length })
        }
    }

    /// Congestion ratio of `edge`: vehicles per unit length.
    pub fn congestion(&self, edge: EdgeId) -> NetworkResult<f64> {
        let length = self.valid_length(edge)?;
        Ok(self.occupancy(edge) as f64 / length)
    }

    /// Cost of entering `edge`: its length plus its congestion ratio.
    ///
    /// Both terms share the length unit, so congestion acts as an additive
    /// penalty on top of distance.
    pub fn edge_cost(&self, edge: EdgeId) -> NetworkResult<f64> {
        let length = self.valid_length(edge)?;
        Ok(length + self.occupancy(edge) as f64 / length)
    }

    /// Record one projected vehicle on `edge`.
    ///
    /// This only changes this snapshot's copy of the counts; the simulator is
    /// not informed.
    pub fn claim(&mut self, edge: EdgeId) {
        if let Some(slot) = self.occupancy.get_mut(edge.index()) {
            *slot = slot.saturating_add(1);
        }
    }

    /// Sum of occupancy across all edges.
    pub fn total_occupancy(&self) -> u64 {
        self.occupancy.iter().map(|&c| c as u64).sum()
    }
}
