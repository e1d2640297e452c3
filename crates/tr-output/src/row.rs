//! Plain data rows written by output backends.

use tr_core::{Tick, VehicleId};
use tr_decide::{SkipReason, TickSample};

/// One decision pass in the deadline series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadlineRow {
    pub tick:          u64,
    pub time_secs:     f64,
    pub vehicles:      u64,
    pub mean_deadline: f64,
    pub fallbacks:     u64,
    pub skipped:       u64,
}

impl From<&TickSample> for DeadlineRow {
    fn from(s: &TickSample) -> Self {
        Self {
            tick:          s.tick.0,
            time_secs:     s.time_secs,
            vehicles:      s.vehicles as u64,
            mean_deadline: s.mean_deadline,
            fallbacks:     s.fallbacks as u64,
            skipped:       s.skipped as u64,
        }
    }
}

/// A vehicle that received no target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRow {
    pub tick:       u64,
    pub vehicle_id: String,
    /// Raw id of the unknown edge the vehicle reported.
    pub edge:       u32,
}

impl SkipRow {
    pub fn new(tick: Tick, vehicle: &VehicleId, reason: &SkipReason) -> Self {
        let edge = match reason {
            SkipReason::UnknownVehicleState { edge } => edge.0,
        };
        Self { tick: tick.0, vehicle_id: vehicle.as_str().to_owned(), edge }
    }
}
