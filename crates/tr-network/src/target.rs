//! Local-target resolution: turn a direction list into one concrete edge.
//!
//! The simulator is steered toward a single edge per tick.  If that edge is
//! too close, the vehicle can reach it (and be treated as arrived) before the
//! next decision, so the resolver walks far enough along the direction list
//! to clear a minimum distance and stops there.

use tr_core::{Direction, EdgeId, Vehicle};

use crate::RoadNetwork;

/// Outcome of resolving a direction list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalTarget {
    /// Edge handed to the simulator.
    pub edge: EdgeId,
    /// Number of directions consumed to reach `edge`.
    pub steps: usize,
    /// Summed length of the edges entered on the way to `edge`.
    pub distance: f64,
}

/// Reduces a vehicle's direction list to a local target edge.
pub trait LocalTargetResolver {
    fn resolve(&self, network: &RoadNetwork, vehicle: &Vehicle, directions: &[Direction]) -> LocalTarget;
}

/// Walks directions until the distance travelled reaches `min_distance`.
///
/// - Empty list: the vehicle's current edge.
/// - A direction unavailable at the current edge, or the list running out:
///   the last edge reached.
/// - Reaching the vehicle's destination ends the walk there, whatever the
///   distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceThresholdResolver {
    pub min_distance: f64,
}

impl DistanceThresholdResolver {
    pub fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }
}

impl LocalTargetResolver for DistanceThresholdResolver {
    fn resolve(&self, network: &RoadNetwork, vehicle: &Vehicle, directions: &[Direction]) -> LocalTarget {
        let mut target = LocalTarget { edge: vehicle.current_edge, steps: 0, distance: 0.0 };

        for &direction in directions {
            let Some(next) = network.next_edge(target.edge, direction) else {
                log::trace!(
                    "vehicle {}: no {direction} turn off {}, stopping after {} steps",
                    vehicle.id, target.edge, target.steps,
                );
                break;
            };
            target.edge = next;
            target.steps += 1;
            target.distance += network.length(next).unwrap_or(0.0);

            if next == vehicle.destination || target.distance >= self.min_distance {
                break;
            }
        }

        target
    }
}
