//! `tr-core` — foundational types for the traffic-routing workspace.
//!
//! This crate is a dependency of every other `tr-*` crate.  It has no `tr-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `EdgeId`, `VehicleId`                                 |
//! | [`direction`] | `Direction` — the six turn choices leaving an edge    |
//! | [`vehicle`]   | `Vehicle` — per-tick vehicle record                   |
//! | [`time`]      | `Tick`, `SimClock`                                    |
//! | [`rng`]       | `SimRng`, numbered `streams`                          |
//! | [`error`]     | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, VehicleId};
pub use rng::{SimRng, streams};
pub use time::{SimClock, Tick};
pub use vehicle::Vehicle;
