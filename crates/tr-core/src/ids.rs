//! Identifier types.
//!
//! Edges are interned by the road network into dense `EdgeId`s so the
//! pathfinder can index flat `Vec`s.  Vehicle ids come straight from the
//! simulator and stay opaque strings.

use std::fmt;

/// Dense index of a directed road edge in a `RoadNetwork`.
///
/// Ids are handed out sequentially by the network builder.  Any id at or past
/// the network's edge count is unknown to that network.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Placeholder for edge names a driver could not resolve.
    pub const INVALID: EdgeId = EdgeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        EdgeId::INVALID
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl TryFrom<usize> for EdgeId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(EdgeId)
    }
}

/// Simulator-assigned vehicle identifier, unique within one tick's batch.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        VehicleId(s.to_owned())
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        VehicleId(s)
    }
}
