//! `tr-decide` — per-tick routing decisions for a batch of vehicles.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`scheduler`]   | `UrgencyOrder`, `order_batch`, `mean_deadline`                  |
//! | [`config`]      | `EngineConfig`                                                  |
//! | [`outcome`]     | `Decisions`, `TargetMap`, `SkipReason`                          |
//! | [`strategy`]    | `RoutingStrategy` trait, `FallbackPolicy`                       |
//! | [`deadline`]    | `DeadlineCongestionStrategy`                                    |
//! | [`random`]      | `RandomStrategy`                                                |
//! | [`diagnostics`] | `DiagnosticsSink` trait, `NoopSink`, `TickSample`, `DeadlineHistory` |
//! | [`engine`]      | `DecisionEngine`                                                |
//! | [`builder`]     | `EngineBuilder`                                                 |
//! | [`error`]       | `DecideError`, `DecideResult<T>`                                |
//!
//! # Per-tick flow
//!
//! ```text
//! driver ──batch──▶ DecisionEngine::make_decisions
//!                     ① capture NetworkSnapshot from the SimulationState provider
//!                     ② strategy orders the batch (UrgencyOrder)
//!                     ③ per vehicle: Pathfinder → direction list
//!                                    LocalTargetResolver → one edge
//!                     ④ mean deadline → DeadlineHistory + DiagnosticsSink
//!        ◀──TargetMap──
//! ```
//!
//! Per-vehicle problems (unreachable destination, vehicle on an unknown edge)
//! are absorbed into the result.  Only a malformed snapshot (an edge with a
//! non-positive length met during a search) aborts the tick.

pub mod builder;
pub mod config;
pub mod deadline;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod random;
pub mod scheduler;
pub mod strategy;


pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use deadline::DeadlineCongestionStrategy;
pub use diagnostics::{DeadlineHistory, DiagnosticsSink, NoopSink, TickSample};
pub use engine::DecisionEngine;
pub use error::{DecideError, DecideResult};
pub use outcome::{Decisions, SkipReason, TargetMap};
pub use random::RandomStrategy;
pub use scheduler::{UrgencyOrder, mean_deadline, order_batch};
pub use strategy::{FallbackPolicy, RoutingStrategy};
