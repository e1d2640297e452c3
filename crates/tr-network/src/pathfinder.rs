//! Routing trait and the congestion-weighted Dijkstra implementation.
//!
//! # Pluggability
//!
//! Strategies call routing through the [`Pathfinder`] trait, so alternative
//! searches (A*, a plain length metric, a cached table) can be swapped in
//! without touching the decision engine.
//!
//! # Cost model
//!
//! Entering edge `e` costs `length(e) + occupancy(e) / length(e)`.  The start
//! edge contributes its own length, since the vehicle already occupies it.
//! With zero occupancy everywhere the search is plain shortest path by
//! length.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use tr_core::{Direction, EdgeId};

use crate::{NetworkError, NetworkResult, NetworkSnapshot};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Turn to take at each step, starting from the origin edge.
    pub directions: Vec<Direction>,
    /// Edges entered by those turns; `edges[i]` is reached by `directions[i]`.
    pub edges: Vec<EdgeId>,
    /// Total cost including the origin edge's length.  Zero for a trivial
    /// route.
    pub cost: f64,
}

impl Route {
    /// A route for a vehicle already on its destination.
    pub fn trivial() -> Self {
        Route { directions: vec![], edges: vec![], cost: 0.0 }
    }

    /// `true` if origin and destination are the same edge.
    pub fn is_trivial(&self) -> bool {
        self.directions.is_empty()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-vehicle route search.
pub trait Pathfinder {
    /// Minimum-cost direction sequence from `from` to `to` on `snapshot`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::UnknownEdge`] if either endpoint is not in the network.
    /// - [`NetworkError::PathNotFound`] if `to` is unreachable.
    /// - [`NetworkError::InvalidEdgeLength`] if the search meets an edge
    ///   whose length is not strictly positive.
    fn find_route(
        &self,
        snapshot: &NetworkSnapshot<'_>,
        from:     EdgeId,
        to:       EdgeId,
    ) -> NetworkResult<Route>;
}

// ── CongestionDijkstra ────────────────────────────────────────────────────────

/// Dijkstra over the directed edge graph with the congestion-weighted cost.
///
/// Frontier selection uses a binary min-heap; finalized edges are tracked in a
/// dense `Vec<bool>` indexed by `EdgeId`.  Ties are broken by `EdgeId` so the
/// result is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CongestionDijkstra;

impl Pathfinder for CongestionDijkstra {
    fn find_route(
        &self,
        snapshot: &NetworkSnapshot<'_>,
        from:     EdgeId,
        to:       EdgeId,
    ) -> NetworkResult<Route> {
        dijkstra(snapshot, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(snapshot: &NetworkSnapshot<'_>, from: EdgeId, to: EdgeId) -> NetworkResult<Route> {
    let network = snapshot.network();
    if !network.contains(from) {
        return Err(NetworkError::UnknownEdge(from));
    }
    if !network.contains(to) {
        return Err(NetworkError::UnknownEdge(to));
    }
    if from == to {
        return Ok(Route::trivial());
    }

    let n = network.edge_count();
    let start_cost = snapshot.valid_length(from)?;

    let mut best    = vec![f64::INFINITY; n];
    // prev[e] = (edge expanded, turn taken) that last improved e.
    let mut prev: Vec<Option<(EdgeId, Direction)>> = vec![None; n];
    let mut settled = vec![false; n];

    best[from.index()] = start_cost;

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, EdgeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(start_cost), from)));

    while let Some(Reverse((OrderedFloat(cost), edge))) = heap.pop() {
        // Stale entry for an edge finalized at a lower cost.
        if settled[edge.index()] {
            continue;
        }
        settled[edge.index()] = true;

        if edge == to {
            let route = reconstruct(&prev, from, to, cost);
            log::trace!("route {from} -> {to}: {} turns, cost {cost:.3}", route.directions.len());
            return Ok(route);
        }

        for (direction, next) in network.out_edges(edge) {
            if settled[next.index()] {
                continue;
            }
            let candidate = cost + snapshot.edge_cost(next)?;
            if candidate < best[next.index()] {
                best[next.index()] = candidate;
                prev[next.index()] = Some((edge, direction));
                heap.push(Reverse((OrderedFloat(candidate), next)));
            }
        }
    }

    Err(NetworkError::PathNotFound { from, to })
}

fn reconstruct(
    prev: &[Option<(EdgeId, Direction)>],
    from: EdgeId,
    to:   EdgeId,
    cost: f64,
) -> Route {
    let mut directions = Vec::new();
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let Some((parent, direction)) = prev[cur.index()] else {
            break;
        };
        directions.push(direction);
        edges.push(cur);
        cur = parent;
    }
    directions.reverse();
    edges.reverse();
    Route { directions, edges, cost }
}
