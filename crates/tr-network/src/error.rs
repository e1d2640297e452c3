//! Network-subsystem error type.

use thiserror::Error;

use tr_core::{Direction, EdgeId};

/// Errors produced by `tr-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no route from {from} to {to}")]
    PathNotFound { from: EdgeId, to: EdgeId },

    #[error("edge {edge} has invalid length {length} (must be > 0)")]
    InvalidEdgeLength { edge: EdgeId, length: f64 },

    #[error("edge {0} not found in network")]
    UnknownEdge(EdgeId),

    #[error("edge name {0:?} not found in network")]
    UnknownEdgeName(String),

    #[error("cannot add edge #{0}: edge ids are exhausted")]
    TooManyEdges(usize),

    #[error("edge name {0:?} defined twice")]
    DuplicateEdge(String),

    #[error("edge {edge} already has an outgoing edge for direction {direction}")]
    DuplicateDirection { edge: EdgeId, direction: Direction },

    #[error("occupancy table has {got} entries, network has {expected} edges")]
    OccupancyMismatch { expected: usize, got: usize },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    /// `true` for errors that describe a malformed network rather than a
    /// per-query miss.  Callers abort the whole tick on these.
    pub fn is_structural(&self) -> bool {
        matches!(self, NetworkError::InvalidEdgeLength { .. } | NetworkError::OccupancyMismatch { .. })
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
