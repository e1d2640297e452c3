//! `tr-network` — road network, live snapshots, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`network`]    | `RoadNetwork` (edges, lengths, direction adjacency), builder  |
//! | [`snapshot`]   | `NetworkSnapshot`, `SimulationState` trait, `InMemoryState`   |
//! | [`pathfinder`] | `Pathfinder` trait, `Route`, `CongestionDijkstra`             |
//! | [`target`]     | `LocalTargetResolver` trait, `DistanceThresholdResolver`      |
//! | [`loader`]     | `load_network_csv`, `load_network_reader`                     |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod pathfinder;
pub mod snapshot;
pub mod target;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use pathfinder::{CongestionDijkstra, Pathfinder, Route};
pub use snapshot::{InMemoryState, NetworkSnapshot, SimulationState};
pub use target::{DistanceThresholdResolver, LocalTarget, LocalTargetResolver};
