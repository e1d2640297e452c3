//! Decision engine configuration.

use crate::{DecideError, DecideResult, FallbackPolicy, UrgencyOrder};

/// Tunables shared by the routing strategies.
///
/// With the `serde` feature every field is optional when deserializing;
/// missing fields take the [`Default`] value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Distance a local target must be from the vehicle before the resolver
    /// stops walking the route.  Same length unit as the network.
    pub min_target_distance: f64,

    /// Order in which a batch is routed.
    pub urgency: UrgencyOrder,

    /// Target used when no route to the destination exists.
    pub fallback: FallbackPolicy,

    /// Count the edges each routed vehicle will enter as extra occupancy for
    /// vehicles routed later in the same tick.
    pub project_claims: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_target_distance: 100.0,
            urgency:             UrgencyOrder::default(),
            fallback:            FallbackPolicy::default(),
            project_claims:      true,
        }
    }
}

impl EngineConfig {
    /// Reject values no strategy can work with.
    pub fn validate(&self) -> DecideResult<()> {
        if !self.min_target_distance.is_finite() || self.min_target_distance < 0.0 {
            return Err(DecideError::Config(format!(
                "min_target_distance must be a finite, non-negative distance (got {})",
                self.min_target_distance
            )));
        }
        Ok(())
    }
}
