//! The `RoutingStrategy` trait and the helpers strategies share.

use log::warn;

use tr_core::{Direction, EdgeId, Vehicle};
use tr_network::{NetworkError, NetworkSnapshot, RoadNetwork};

use crate::{DecideResult, Decisions, SkipReason};

/// Pluggable per-tick routing policy.
///
/// A strategy receives the whole batch at once so that it can decide how the
/// vehicles compete for road capacity.  It must give every vehicle either a
/// target or a skip reason, and it may only fail the tick for problems with
/// the snapshot itself (see [`NetworkError::is_structural`]).
///
/// # Example
///
/// ```rust,ignore
/// struct StayPut;
///
/// impl RoutingStrategy for StayPut {
///     fn name(&self) -> &'static str { "stay-put" }
///
///     fn compute_decisions(&mut self, batch: &[Vehicle], _: &NetworkSnapshot<'_>)
///         -> DecideResult<Decisions>
///     {
///         let mut out = Decisions::with_capacity(batch.len());
///         for v in batch {
///             out.insert(v.id.clone(), v.current_edge);
///         }
///         Ok(out)
///     }
/// }
/// ```
pub trait RoutingStrategy {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    /// Check the strategy's parameters.  Called by
    /// [`EngineBuilder::build`][crate::EngineBuilder::build].
    fn validate(&self) -> DecideResult<()> {
        Ok(())
    }

    /// Choose a local target edge for every vehicle in `batch`.
    fn compute_decisions(
        &mut self,
        batch:    &[Vehicle],
        snapshot: &NetworkSnapshot<'_>,
    ) -> DecideResult<Decisions>;
}

impl<S: RoutingStrategy + ?Sized> RoutingStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn validate(&self) -> DecideResult<()> {
        (**self).validate()
    }

    fn compute_decisions(
        &mut self,
        batch:    &[Vehicle],
        snapshot: &NetworkSnapshot<'_>,
    ) -> DecideResult<Decisions> {
        (**self).compute_decisions(batch, snapshot)
    }
}

// ── FallbackPolicy ────────────────────────────────────────────────────────────

/// Target for a vehicle whose destination cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackPolicy {
    /// Keep the vehicle on its current edge.
    #[default]
    StayOnCurrent,
    /// Send the vehicle onto its first outgoing edge (in `Direction::ALL`
    /// order), or keep it in place on a dead end.
    AnyOutgoing,
}

impl FallbackPolicy {
    pub fn target(self, network: &RoadNetwork, vehicle: &Vehicle) -> EdgeId {
        match self {
            FallbackPolicy::StayOnCurrent => vehicle.current_edge,
            FallbackPolicy::AnyOutgoing => network
                .out_edges(vehicle.current_edge)
                .next()
                .map(|(_, edge)| edge)
                .unwrap_or(vehicle.current_edge),
        }
    }
}

// ── Shared per-vehicle handling ───────────────────────────────────────────────

/// `Some` if `vehicle` cannot be routed at all this tick.
pub(crate) fn screen(vehicle: &Vehicle, network: &RoadNetwork) -> Option<SkipReason> {
    if network.contains(vehicle.current_edge) {
        None
    } else {
        warn!("vehicle {}: unknown current edge {}, skipping", vehicle.id, vehicle.current_edge);
        Some(SkipReason::UnknownVehicleState { edge: vehicle.current_edge })
    }
}

/// Turn a routing failure into a fallback target, or pass it on if the
/// snapshot itself is broken.
pub(crate) fn absorb_route_error(
    err:     NetworkError,
    vehicle: &Vehicle,
    policy:  FallbackPolicy,
    network: &RoadNetwork,
) -> DecideResult<EdgeId> {
    if err.is_structural() {
        return Err(err.into());
    }
    let edge = policy.target(network, vehicle);
    warn!("vehicle {}: {err}; falling back to {edge}", vehicle.id);
    Ok(edge)
}

/// Check the length of every edge `vehicle` enters on its first `steps`
/// directions.  A bad length here fails the tick like any other structural
/// error.
pub(crate) fn check_entered(
    snapshot:   &NetworkSnapshot<'_>,
    vehicle:    &Vehicle,
    directions: &[Direction],
    steps:      usize,
) -> DecideResult<()> {
    let network = snapshot.network();
    let mut edge = vehicle.current_edge;
    for &direction in directions.iter().take(steps) {
        let Some(next) = network.next_edge(edge, direction) else {
            break;
        };
        snapshot.valid_length(next)?;
        edge = next;
    }
    Ok(())
}
