//! Deadline-ordered, congestion-aware routing.

use log::trace;

use tr_core::Vehicle;
use tr_network::{
    CongestionDijkstra, DistanceThresholdResolver, LocalTargetResolver, NetworkSnapshot,
    Pathfinder,
};

use crate::strategy::{absorb_route_error, check_entered, screen};
use crate::{DecideResult, Decisions, EngineConfig, RoutingStrategy, order_batch};

/// Routes each vehicle on the congestion-weighted shortest path and hands the
/// simulator the first edge at least `min_target_distance` along it.
///
/// Vehicles are processed in [`EngineConfig::urgency`] order.  With
/// `project_claims` on, each routed vehicle adds itself to the occupancy of
/// the edges it will enter before its target, so later vehicles in the same
/// tick see that load.  The caller's snapshot is never modified.
pub struct DeadlineCongestionStrategy<P = CongestionDijkstra, R = DistanceThresholdResolver> {
    config:     EngineConfig,
    pathfinder: P,
    resolver:   R,
}

impl DeadlineCongestionStrategy {
    /// Dijkstra routing with a distance-threshold resolver built from
    /// `config.min_target_distance`.
    pub fn new(config: EngineConfig) -> Self {
        let resolver = DistanceThresholdResolver::new(config.min_target_distance);
        Self { config, pathfinder: CongestionDijkstra, resolver }
    }
}

impl<P: Pathfinder, R: LocalTargetResolver> DeadlineCongestionStrategy<P, R> {
    pub fn with_parts(config: EngineConfig, pathfinder: P, resolver: R) -> Self {
        Self { config, pathfinder, resolver }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<P: Pathfinder, R: LocalTargetResolver> RoutingStrategy for DeadlineCongestionStrategy<P, R> {
    fn name(&self) -> &'static str {
        "deadline-congestion"
    }

    fn validate(&self) -> DecideResult<()> {
        self.config.validate()
    }

    fn compute_decisions(
        &mut self,
        batch:    &[Vehicle],
        snapshot: &NetworkSnapshot<'_>,
    ) -> DecideResult<Decisions> {
        let network = snapshot.network();
        let mut working = snapshot.clone();
        let mut decisions = Decisions::with_capacity(batch.len());

        for vehicle in order_batch(batch, self.config.urgency) {
            if let Some(reason) = screen(vehicle, network) {
                decisions.skip(vehicle.id.clone(), reason);
                continue;
            }

            match self.pathfinder.find_route(&working, vehicle.current_edge, vehicle.destination) {
                Ok(route) => {
                    let target = self.resolver.resolve(network, vehicle, &route.directions);
                    check_entered(&working, vehicle, &route.directions, target.steps)?;
                    if self.config.project_claims {
                        for &edge in route.edges.iter().take(target.steps) {
                            working.claim(edge);
                        }
                    }
                    trace!(
                        "vehicle {} (deadline {:.1}): {} -> {} via {} of {} turns",
                        vehicle.id, vehicle.deadline, vehicle.current_edge, target.edge,
                        target.steps, route.directions.len(),
                    );
                    decisions.insert(vehicle.id.clone(), target.edge);
                }
                Err(err) => {
                    let edge = absorb_route_error(err, vehicle, self.config.fallback, network)?;
                    if self.config.project_claims && edge != vehicle.current_edge {
                        working.claim(edge);
                    }
                    decisions.insert_fallback(vehicle.id.clone(), edge);
                }
            }
        }

        Ok(decisions)
    }
}
