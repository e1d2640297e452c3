//! `tr-output` — diagnostics export for the decision engine.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                       |
//! |-----------|---------|-----------------------------------------------------|
//! | *(none)*  | CSV     | `deadline_series.csv`, `skipped_vehicles.csv`       |
//! | `sqlite`  | SQLite  | `diagnostics.db`                                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`SinkOutput`], which
//! implements `tr_decide::DiagnosticsSink`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tr_output::{CsvWriter, SinkOutput};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut engine = EngineBuilder::new(strategy, state)
//!     .sink(SinkOutput::new(writer))
//!     .build()?;
//! // ... run ticks ...
//! engine.finish();
//! if let Some(e) = engine.sink_mut().take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SinkOutput;
pub use row::{DeadlineRow, SkipRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
