//! Seeded random-walk baseline.

use log::trace;

use tr_core::{Direction, EdgeId, SimRng, Vehicle};
use tr_network::{
    CongestionDijkstra, DistanceThresholdResolver, LocalTargetResolver, NetworkError,
    NetworkSnapshot, Pathfinder, RoadNetwork,
};

use crate::strategy::{absorb_route_error, check_entered, screen};
use crate::{DecideError, DecideResult, Decisions, EngineConfig, RoutingStrategy};

/// Default number of random turns planned per vehicle per tick.
pub const DEFAULT_LOOKAHEAD: usize = 8;

/// Default remaining cost below which a vehicle heads straight for its
/// destination.
pub const DEFAULT_REACH_DISTANCE: f64 = 300.0;

/// Wanders each vehicle along randomly chosen turns until it is close to its
/// destination, then follows the congestion-weighted shortest path.
///
/// Vehicles are processed in batch order.  The walk only picks turns that
/// exist, so the resolver never stops on a missing connection.  A vehicle on
/// a dead end with nowhere to go is recorded as a fallback.  Runs are
/// reproducible for a given seed and batch sequence.
pub struct RandomStrategy<P = CongestionDijkstra, R = DistanceThresholdResolver> {
    config:         EngineConfig,
    pathfinder:     P,
    resolver:       R,
    rng:            SimRng,
    lookahead:      usize,
    reach_distance: f64,
}

impl RandomStrategy {
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        let resolver = DistanceThresholdResolver::new(config.min_target_distance);
        Self::with_parts(config, CongestionDijkstra, resolver, seed)
    }
}

impl<P: Pathfinder, R: LocalTargetResolver> RandomStrategy<P, R> {
    /// Random walk with a caller-supplied pathfinder and resolver.
    pub fn with_parts(config: EngineConfig, pathfinder: P, resolver: R, seed: u64) -> Self {
        Self {
            config,
            pathfinder,
            resolver,
            rng: SimRng::new(seed),
            lookahead: DEFAULT_LOOKAHEAD,
            reach_distance: DEFAULT_REACH_DISTANCE,
        }
    }

    /// Number of random turns planned per vehicle.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Remaining route cost under which the walk gives way to the shortest
    /// path.
    pub fn with_reach_distance(mut self, reach_distance: f64) -> Self {
        self.reach_distance = reach_distance;
        self
    }

    fn random_walk(&mut self, network: &RoadNetwork, from: EdgeId) -> Vec<Direction> {
        let mut directions = Vec::with_capacity(self.lookahead);
        let mut edge = from;
        for _ in 0..self.lookahead {
            let options: Vec<(Direction, EdgeId)> = network.out_edges(edge).collect();
            let Some(&(direction, next)) = self.rng.choose(&options) else {
                break;
            };
            directions.push(direction);
            edge = next;
        }
        directions
    }
}

impl<P: Pathfinder, R: LocalTargetResolver> RoutingStrategy for RandomStrategy<P, R> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn validate(&self) -> DecideResult<()> {
        self.config.validate()?;
        if self.lookahead == 0 {
            return Err(DecideError::Config("random lookahead must be at least 1".into()));
        }
        if !self.reach_distance.is_finite() || self.reach_distance < 0.0 {
            return Err(DecideError::Config(format!(
                "reach_distance must be a finite, non-negative distance (got {})",
                self.reach_distance
            )));
        }
        Ok(())
    }

    fn compute_decisions(
        &mut self,
        batch:    &[Vehicle],
        snapshot: &NetworkSnapshot<'_>,
    ) -> DecideResult<Decisions> {
        let network = snapshot.network();
        let mut decisions = Decisions::with_capacity(batch.len());

        for vehicle in batch {
            if let Some(reason) = screen(vehicle, network) {
                decisions.skip(vehicle.id.clone(), reason);
                continue;
            }

            let route = match self.pathfinder.find_route(
                snapshot,
                vehicle.current_edge,
                vehicle.destination,
            ) {
                Ok(route) => Some(route),
                Err(err) if err.is_structural() => return Err(err.into()),
                Err(_) => None,
            };

            let start_length = network.length(vehicle.current_edge).unwrap_or(0.0);
            let directions = match route {
                Some(route) if route.cost - start_length <= self.reach_distance => {
                    route.directions
                }
                _ => self.random_walk(network, vehicle.current_edge),
            };

            if directions.is_empty() && !vehicle.has_arrived() {
                // Dead end: the walk found no outgoing edge.
                let err = NetworkError::PathNotFound {
                    from: vehicle.current_edge,
                    to:   vehicle.destination,
                };
                let edge = absorb_route_error(err, vehicle, self.config.fallback, network)?;
                decisions.insert_fallback(vehicle.id.clone(), edge);
                continue;
            }

            let target = self.resolver.resolve(network, vehicle, &directions);
            check_entered(snapshot, vehicle, &directions, target.steps)?;
            trace!(
                "vehicle {}: {} -> {} after {} of {} turns",
                vehicle.id, vehicle.current_edge, target.edge, target.steps, directions.len(),
            );
            decisions.insert(vehicle.id.clone(), target.edge);
        }

        Ok(decisions)
    }
}
