//! Road network representation and builder.
//!
//! # Data layout
//!
//! The routing unit is the **edge** (a directed road segment), not the
//! junction.  Each edge has a length and at most one successor per
//! [`Direction`].  Successors are stored as a fixed-size array per edge,
//! indexed by `Direction::index()`, with `EdgeId::INVALID` marking an absent
//! turn:
//!
//! ```text
//! outgoing[e][Direction::Left.index()] == next edge after turning left off e
//! ```
//!
//! All per-edge arrays (`edge_names`, `edge_length`, `outgoing`) are indexed
//! by `EdgeId`, so every lookup the pathfinder performs is O(1).
//!
//! Edge names are the simulator's opaque string ids; they are interned to
//! dense `EdgeId`s at build time.

use rustc_hash::FxHashMap;

use tr_core::{Direction, EdgeId};

use crate::{NetworkError, NetworkResult};

/// Successor table for one edge.
type Successors = [EdgeId; Direction::COUNT];

const NO_SUCCESSORS: Successors = [EdgeId::INVALID; Direction::COUNT];

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Static road topology.
///
/// Read-only from the planner's perspective; the live occupancy that changes
/// tick to tick lives in [`NetworkSnapshot`][crate::NetworkSnapshot].
/// Construct with [`RoadNetworkBuilder`] or the CSV [`loader`][crate::loader].
#[derive(Debug)]
pub struct RoadNetwork {
    /// Simulator name of each edge.
    pub edge_names: Vec<String>,

    /// Length of each edge.  Not validated at build time; the pathfinder
    /// rejects non-positive lengths when it meets them.
    pub edge_length: Vec<f64>,

    /// Successor per direction, `EdgeId::INVALID` where no turn exists.
    pub outgoing: Vec<Successors>,

    by_name: FxHashMap<String, EdgeId>,
}

impl RoadNetwork {
    /// Construct a network with no edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn edge_count(&self) -> usize {
        self.edge_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_length.is_empty()
    }

    /// `true` if `edge` names an edge of this network.
    #[inline]
    pub fn contains(&self, edge: EdgeId) -> bool {
        edge.index() < self.edge_count()
    }

    // ── Names ─────────────────────────────────────────────────────────────

    /// Resolve a simulator edge name.
    pub fn edge_id(&self, name: &str) -> Option<EdgeId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a simulator edge name, mapping misses to `EdgeId::INVALID`.
    ///
    /// Drivers use this when building vehicle records so that a vehicle on an
    /// unknown edge is still reported (and then skipped with a diagnostic).
    pub fn edge_id_or_invalid(&self, name: &str) -> EdgeId {
        self.edge_id(name).unwrap_or(EdgeId::INVALID)
    }

    pub fn edge_name(&self, edge: EdgeId) -> Option<&str> {
        self.edge_names.get(edge.index()).map(String::as_str)
    }

    // ── Topology ──────────────────────────────────────────────────────────

    /// Length of `edge`, or `None` if the edge is unknown.
    #[inline]
    pub fn length(&self, edge: EdgeId) -> Option<f64> {
        self.edge_length.get(edge.index()).copied()
    }

    /// Edge reached by leaving `edge` in `direction`.
    ///
    /// An absent direction is not an error; it simply returns `None`.
    #[inline]
    pub fn next_edge(&self, edge: EdgeId, direction: Direction) -> Option<EdgeId> {
        let next = self.outgoing.get(edge.index())?[direction.index()];
        (next != EdgeId::INVALID).then_some(next)
    }

    /// `(direction, next_edge)` pairs leaving `edge`, in [`Direction::ALL`]
    /// order.  Empty for unknown edges.
    pub fn out_edges(&self, edge: EdgeId) -> impl Iterator<Item = (Direction, EdgeId)> + '_ {
        let row = self.outgoing.get(edge.index());
        Direction::ALL.into_iter().filter_map(move |d| {
            let next = row?[d.index()];
            (next != EdgeId::INVALID).then_some((d, next))
        })
    }

    /// The direction → next-edge map of `edge` as an owned table.
    pub fn outgoing_map(&self, edge: EdgeId) -> FxHashMap<Direction, EdgeId> {
        self.out_edges(edge).collect()
    }

    /// Number of available turns leaving `edge`.
    pub fn out_degree(&self, edge: EdgeId) -> usize {
        self.out_edges(edge).count()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tr_core::Direction;
/// use tr_network::RoadNetworkBuilder;
///
/// # fn main() -> Result<(), tr_network::NetworkError> {
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_edge("a", 120.0)?;
/// let c = b.add_edge("c", 80.0)?;
/// b.connect(a, Direction::Right, c)?;
/// let net = b.build();
/// assert_eq!(net.edge_count(), 2);
/// assert_eq!(net.next_edge(a, Direction::Right), Some(c));
/// assert_eq!(net.next_edge(a, Direction::Left), None);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    names:    Vec<String>,
    lengths:  Vec<f64>,
    outgoing: Vec<Successors>,
    by_name:  FxHashMap<String, EdgeId>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            names:    Vec::with_capacity(edges),
            lengths:  Vec::with_capacity(edges),
            outgoing: Vec::with_capacity(edges),
            by_name:  FxHashMap::with_capacity_and_hasher(edges, Default::default()),
        }
    }

    /// Add an edge and return its `EdgeId` (sequential from 0).
    pub fn add_edge(&mut self, name: impl Into<String>, length: f64) -> NetworkResult<EdgeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(NetworkError::DuplicateEdge(name));
        }
        let id = edge_id_at(self.lengths.len())?;
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        self.lengths.push(length);
        self.outgoing.push(NO_SUCCESSORS);
        Ok(id)
    }

    /// Record that leaving `from` in `direction` leads onto `to`.
    ///
    /// Re-adding the identical connection is a no-op; a different successor
    /// for an occupied direction is rejected.
    pub fn connect(&mut self, from: EdgeId, direction: Direction, to: EdgeId) -> NetworkResult<()> {
        if to.index() >= self.lengths.len() {
            return Err(NetworkError::UnknownEdge(to));
        }
        let row = self
            .outgoing
            .get_mut(from.index())
            .ok_or(NetworkError::UnknownEdge(from))?;
        let slot = &mut row[direction.index()];
        if *slot != EdgeId::INVALID && *slot != to {
            return Err(NetworkError::DuplicateDirection { edge: from, direction });
        }
        *slot = to;
        Ok(())
    }

    /// [`connect`](Self::connect) by simulator edge names.
    pub fn connect_names(&mut self, from: &str, direction: Direction, to: &str) -> NetworkResult<()> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        self.connect(from, direction, to)
    }

    /// Look up an edge added earlier.
    pub fn edge_id(&self, name: &str) -> Option<EdgeId> {
        self.by_name.get(name).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.lengths.len()
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        debug_assert_eq!(self.names.len(), self.outgoing.len());
        RoadNetwork {
            edge_names:  self.names,
            edge_length: self.lengths,
            outgoing:    self.outgoing,
            by_name:     self.by_name,
        }
    }

    fn lookup(&self, name: &str) -> NetworkResult<EdgeId> {
        self.edge_id(name)
            .ok_or_else(|| NetworkError::UnknownEdgeName(name.to_owned()))
    }
}

/// Id for the edge stored at `index`.  `EdgeId::INVALID` is reserved.
pub(crate) fn edge_id_at(index: usize) -> NetworkResult<EdgeId> {
    match EdgeId::try_from(index) {
        Ok(id) if id != EdgeId::INVALID => Ok(id),
        _ => Err(NetworkError::TooManyEdges(index)),
    }
}
