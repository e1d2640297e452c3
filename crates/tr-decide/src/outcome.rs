//! The result of one tick's routing pass.

use std::fmt;

use rustc_hash::FxHashMap;

use tr_core::{EdgeId, VehicleId};

/// Vehicle → local target edge.
pub type TargetMap = FxHashMap<VehicleId, EdgeId>;

/// Why a vehicle received no target.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The vehicle's reported edge is not part of the network, e.g. it is
    /// inside a junction.
    UnknownVehicleState { edge: EdgeId },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownVehicleState { edge } => {
                write!(f, "current edge {edge} is not in the network")
            }
        }
    }
}

/// Targets for one batch plus what had to be absorbed to produce them.
///
/// Every vehicle in the batch ends up in exactly one of `targets` or
/// `skipped`.  `fallbacks` lists the subset of `targets` that did not come
/// from a route to the destination.
#[derive(Debug, Clone, Default)]
pub struct Decisions {
    pub targets:   TargetMap,
    pub fallbacks: Vec<VehicleId>,
    pub skipped:   Vec<(VehicleId, SkipReason)>,
}

impl Decisions {
    pub fn with_capacity(n: usize) -> Self {
        let mut targets = TargetMap::default();
        targets.reserve(n);
        Self { targets, fallbacks: Vec::new(), skipped: Vec::new() }
    }

    /// Record a routed target.
    pub fn insert(&mut self, vehicle: VehicleId, edge: EdgeId) {
        self.targets.insert(vehicle, edge);
    }

    /// Record a target chosen by the fallback policy.
    pub fn insert_fallback(&mut self, vehicle: VehicleId, edge: EdgeId) {
        self.fallbacks.push(vehicle.clone());
        self.targets.insert(vehicle, edge);
    }

    pub fn skip(&mut self, vehicle: VehicleId, reason: SkipReason) {
        self.skipped.push((vehicle, reason));
    }

    pub fn target(&self, vehicle: &VehicleId) -> Option<EdgeId> {
        self.targets.get(vehicle).copied()
    }

    pub fn is_fallback(&self, vehicle: &VehicleId) -> bool {
        self.fallbacks.contains(vehicle)
    }

    /// Vehicles that received a target.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
