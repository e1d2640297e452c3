//! Per-tick vehicle record.

use crate::{EdgeId, VehicleId};

/// A vehicle as the driver reports it for one tick.
///
/// Created when a trip is injected into the simulation, updated every tick as
/// the vehicle advances (`current_edge`, and possibly `deadline`), and dropped
/// from the batch once it arrives or is evicted by the simulator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,

    /// Edge the vehicle currently occupies.  `EdgeId::INVALID` when the
    /// driver could not map the simulator's edge name onto the network.
    pub current_edge: EdgeId,

    /// Edge the trip ends on.
    pub destination: EdgeId,

    /// Remaining time budget.  Ordering semantics are chosen by the
    /// scheduler's `UrgencyOrder`, not by this type.
    pub deadline: f64,

    /// Simulation time (seconds) at which the trip was injected.
    pub start_time: Option<f64>,
}

impl Vehicle {
    pub fn new(
        id:           impl Into<VehicleId>,
        current_edge: EdgeId,
        destination:  EdgeId,
        deadline:     f64,
    ) -> Self {
        Self {
            id: id.into(),
            current_edge,
            destination,
            deadline,
            start_time: None,
        }
    }

    /// Builder-style setter for the trip start time.
    pub fn with_start_time(mut self, secs: f64) -> Self {
        self.start_time = Some(secs);
        self
    }

    /// `true` once the vehicle stands on its destination edge.
    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.current_edge == self.destination
    }

    /// Seconds since trip injection at `now_secs`, if the start is known.
    pub fn elapsed_secs(&self, now_secs: f64) -> Option<f64> {
        self.start_time.map(|t0| (now_secs - t0).max(0.0))
    }
}
