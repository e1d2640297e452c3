//! CSV network loader.
//!
//! # CSV format
//!
//! Two files.  Edges, one row per directed edge:
//!
//! ```csv
//! edge_id,length
//! main_n,120.5
//! main_s,120.5
//! -side_e,48.0
//! ```
//!
//! Connections, one row per turn:
//!
//! ```csv
//! from,direction,to
//! main_n,s,main_n2
//! main_n,r,-side_e
//! ```
//!
//! **`direction`** is a single connection code: `s` straight, `t`
//! turn-around, `l` left, `r` right, `L` slight-left, `R` slight-right.
//!
//! Connections may only reference edges declared in the edges file.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tr_core::Direction;

use crate::{NetworkError, NetworkResult, RoadNetwork, RoadNetworkBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    edge_id: String,
    length:  f64,
}

#[derive(Deserialize)]
struct ConnectionRecord {
    from:      String,
    direction: String,
    to:        String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadNetwork`] from an edges CSV and a connections CSV.
pub fn load_network_csv(edges: &Path, connections: &Path) -> NetworkResult<RoadNetwork> {
    let edges_file = std::fs::File::open(edges)?;
    let connections_file = std::fs::File::open(connections)?;
    load_network_reader(edges_file, connections_file)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or for networks embedded in
/// a binary.
pub fn load_network_reader<E: Read, C: Read>(edges: E, connections: C) -> NetworkResult<RoadNetwork> {
    let mut builder = RoadNetworkBuilder::new();

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        builder.add_edge(row.edge_id.trim(), row.length)?;
    }

    // ── Connections ───────────────────────────────────────────────────────
    let mut connection_reader = csv::Reader::from_reader(connections);
    let mut connection_count = 0usize;
    for result in connection_reader.deserialize::<ConnectionRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let direction: Direction = row
            .direction
            .parse()
            .map_err(|e: tr_core::CoreError| NetworkError::Parse(e.to_string()))?;
        builder.connect_names(row.from.trim(), direction, row.to.trim())?;
        connection_count += 1;
    }

    log::debug!(
        "loaded network: {} edges, {} connections",
        builder.edge_count(),
        connection_count
    );
    Ok(builder.build())
}
