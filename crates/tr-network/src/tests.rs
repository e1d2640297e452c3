//! Unit tests for tr-network.
//!
//! All tests use hand-crafted networks so they run without any input files.

#[cfg(test)]
mod helpers {
    use tr_core::{Direction, EdgeId};

    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Diamond network, all lengths 100:
    ///
    /// ```text
    ///        l → B → s
    ///   A                D
    ///        r → C → s
    /// ```
    pub fn diamond() -> (RoadNetwork, [EdgeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("A", 100.0).unwrap();
        let bb = b.add_edge("B", 100.0).unwrap();
        let c = b.add_edge("C", 100.0).unwrap();
        let d = b.add_edge("D", 100.0).unwrap();
        b.connect(a, Direction::Left, bb).unwrap();
        b.connect(a, Direction::Right, c).unwrap();
        b.connect(bb, Direction::Straight, d).unwrap();
        b.connect(c, Direction::Straight, d).unwrap();
        (b.build(), [a, bb, c, d])
    }

    /// Two routes from A to D where fewer hops is longer:
    ///
    /// - A -l-> B(300) -s-> D          : 300 + 50
    /// - A -r-> C(100) -s-> E(100) -s-> D : 200 + 50
    pub fn long_vs_short() -> (RoadNetwork, [EdgeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("A", 10.0).unwrap();
        let bb = b.add_edge("B", 300.0).unwrap();
        let c = b.add_edge("C", 100.0).unwrap();
        let e = b.add_edge("E", 100.0).unwrap();
        let d = b.add_edge("D", 50.0).unwrap();
        b.connect(a, Direction::Left, bb).unwrap();
        b.connect(a, Direction::Right, c).unwrap();
        b.connect(bb, Direction::Straight, d).unwrap();
        b.connect(c, Direction::Straight, e).unwrap();
        b.connect(e, Direction::Straight, d).unwrap();
        (b.build(), [a, bb, c, e, d])
    }

    /// Straight chain e0 → e1 → e2 → e3, each 40 long.
    pub fn chain() -> (RoadNetwork, [EdgeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let ids: Vec<EdgeId> = (0..4).map(|i| b.add_edge(format!("e{i}"), 40.0).unwrap()).collect();
        for w in ids.windows(2) {
            b.connect(w[0], Direction::Straight, w[1]).unwrap();
        }
        (b.build(), [ids[0], ids[1], ids[2], ids[3]])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tr_core::{Direction, EdgeId};

    use crate::{NetworkError, RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetwork::empty();
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(!net.contains(EdgeId(0)));
    }

    #[test]
    fn names_interned() {
        let (net, [a, _, _, d]) = super::helpers::diamond();
        assert_eq!(net.edge_id("A"), Some(a));
        assert_eq!(net.edge_name(d), Some("D"));
        assert_eq!(net.edge_id("missing"), None);
        assert_eq!(net.edge_id_or_invalid("missing"), EdgeId::INVALID);
    }

    #[test]
    fn duplicate_edge_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge("x", 1.0).unwrap();
        assert!(matches!(b.add_edge("x", 2.0), Err(NetworkError::DuplicateEdge(n)) if n == "x"));
    }

    #[test]
    fn edge_ids_stop_short_of_invalid() {
        use crate::network::edge_id_at;

        assert_eq!(edge_id_at(5).unwrap(), EdgeId(5));
        assert_eq!(edge_id_at(u32::MAX as usize - 1).unwrap(), EdgeId(u32::MAX - 1));
        assert!(matches!(
            edge_id_at(u32::MAX as usize),
            Err(NetworkError::TooManyEdges(n)) if n == u32::MAX as usize
        ));
        assert!(matches!(edge_id_at(usize::MAX), Err(NetworkError::TooManyEdges(_))));
        assert!(!NetworkError::TooManyEdges(0).is_structural());
    }

    #[test]
    fn one_successor_per_direction() {
        let mut b = RoadNetworkBuilder::new();
        let x = b.add_edge("x", 1.0).unwrap();
        let y = b.add_edge("y", 1.0).unwrap();
        let z = b.add_edge("z", 1.0).unwrap();
        b.connect(x, Direction::Left, y).unwrap();
        // Same connection twice is fine.
        b.connect(x, Direction::Left, y).unwrap();
        let err = b.connect(x, Direction::Left, z).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::DuplicateDirection { edge, direction: Direction::Left } if edge == x
        ));
    }

    #[test]
    fn connect_unknown_edge() {
        let mut b = RoadNetworkBuilder::new();
        let x = b.add_edge("x", 1.0).unwrap();
        assert!(matches!(b.connect(x, Direction::Straight, EdgeId(9)), Err(NetworkError::UnknownEdge(_))));
        assert!(matches!(b.connect(EdgeId(9), Direction::Straight, x), Err(NetworkError::UnknownEdge(_))));
        assert!(matches!(
            b.connect_names("x", Direction::Straight, "nope"),
            Err(NetworkError::UnknownEdgeName(_))
        ));
    }

    #[test]
    fn out_edges_in_direction_order() {
        let (net, [a, b, c, d]) = super::helpers::diamond();
        let outs: Vec<_> = net.out_edges(a).collect();
        assert_eq!(outs, vec![(Direction::Left, b), (Direction::Right, c)]);
        assert_eq!(net.out_degree(d), 0);
        assert_eq!(net.out_edges(EdgeId(99)).count(), 0);

        let map = net.outgoing_map(a);
        assert_eq!(map.get(&Direction::Right), Some(&c));
        assert_eq!(map.get(&Direction::Straight), None);
    }
}

// ── Snapshots & state provider ────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use tr_core::{EdgeId, SimClock};

    use crate::{InMemoryState, NetworkError, NetworkSnapshot, RoadNetworkBuilder, SimulationState};

    fn state() -> InMemoryState {
        InMemoryState::new(SimClock::new(0.0, 1.0).unwrap())
    }

    #[test]
    fn capture_copies_live_counts() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut st = state();
        st.enter(b);
        st.enter(b);
        st.advance();
        let snap = NetworkSnapshot::capture(&net, &st);
        assert_eq!(snap.occupancy(b), 2);
        assert_eq!(snap.occupancy(a), 0);
        assert_eq!(snap.time_secs(), 1.0);

        // Later changes to the state do not leak into the snapshot.
        st.enter(a);
        assert_eq!(snap.occupancy(a), 0);
        assert_eq!(st.vehicle_count(a), 1);
    }

    #[test]
    fn counts_never_negative() {
        let mut st = state();
        st.leave(EdgeId(0));
        assert_eq!(st.vehicle_count(EdgeId(0)), 0);
        st.set_count(EdgeId(0), 3);
        st.leave(EdgeId(0));
        assert_eq!(st.vehicle_count(EdgeId(0)), 2);
        st.clear_counts();
        assert_eq!(st.vehicle_count(EdgeId(0)), 0);
    }

    #[test]
    fn from_counts_length_checked() {
        let (net, _) = super::helpers::diamond();
        assert!(NetworkSnapshot::from_counts(&net, vec![0; 4], 0.0).is_ok());
        assert!(matches!(
            NetworkSnapshot::from_counts(&net, vec![0; 3], 0.0),
            Err(NetworkError::OccupancyMismatch { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn congestion_ratio() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let snap = NetworkSnapshot::free_flow(&net).with_occupancy(b, 5);
        assert_eq!(snap.congestion(a).unwrap(), 0.0);
        assert!((snap.congestion(b).unwrap() - 0.05).abs() < 1e-12);
        assert!((snap.edge_cost(b).unwrap() - 100.05).abs() < 1e-9);
    }

    #[test]
    fn congestion_monotone_in_occupancy() {
        let (net, [_, b, _, _]) = super::helpers::diamond();
        let mut last = -1.0;
        for count in 0..20 {
            let cost = NetworkSnapshot::free_flow(&net)
                .with_occupancy(b, count)
                .edge_cost(b)
                .unwrap();
            assert!(cost >= last);
            last = cost;
        }
    }

    #[test]
    fn claim_only_touches_the_copy() {
        let (net, [a, _, _, _]) = super::helpers::diamond();
        let base = NetworkSnapshot::free_flow(&net);
        let mut working = base.clone();
        working.claim(a);
        working.claim(a);
        working.claim(EdgeId(42)); // ignored
        assert_eq!(working.occupancy(a), 2);
        assert_eq!(base.occupancy(a), 0);
        assert_eq!(working.total_occupancy(), 2);
    }

    #[test]
    fn invalid_lengths_rejected() {
        let mut b = RoadNetworkBuilder::new();
        let zero = b.add_edge("zero", 0.0).unwrap();
        let neg = b.add_edge("neg", -3.0).unwrap();
        let nan = b.add_edge("nan", f64::NAN).unwrap();
        let net = b.build();
        let snap = NetworkSnapshot::free_flow(&net);
        for e in [zero, neg, nan] {
            assert!(matches!(snap.congestion(e), Err(NetworkError::InvalidEdgeLength { edge, .. }) if edge == e));
        }
        assert!(matches!(snap.valid_length(EdgeId(7)), Err(NetworkError::UnknownEdge(_))));
    }
}

// ── Congestion-weighted Dijkstra ──────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use tr_core::{Direction, EdgeId};

    use crate::{CongestionDijkstra, NetworkError, NetworkSnapshot, Pathfinder, RoadNetworkBuilder};

    #[test]
    fn trivial_same_edge() {
        let (net, [a, ..]) = super::helpers::diamond();
        let r = CongestionDijkstra
            .find_route(&NetworkSnapshot::free_flow(&net), a, a)
            .unwrap();
        assert!(r.is_trivial());
        assert!(r.edges.is_empty());
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn congested_branch_avoided() {
        let (net, [a, b, c, d]) = super::helpers::diamond();
        let snap = NetworkSnapshot::free_flow(&net).with_occupancy(b, 5);
        let r = CongestionDijkstra.find_route(&snap, a, d).unwrap();
        assert_eq!(r.directions, vec![Direction::Right, Direction::Straight]);
        assert_eq!(r.edges, vec![c, d]);
        assert!((r.cost - 300.0).abs() < 1e-9);

        // Move the congestion to C and the route flips.
        let snap = NetworkSnapshot::free_flow(&net).with_occupancy(c, 5);
        let r = CongestionDijkstra.find_route(&snap, a, d).unwrap();
        assert_eq!(r.edges, vec![b, d]);
    }

    #[test]
    fn ties_break_deterministically() {
        let (net, [a, b, _, d]) = super::helpers::diamond();
        let snap = NetworkSnapshot::free_flow(&net);
        let first = CongestionDijkstra.find_route(&snap, a, d).unwrap();
        for _ in 0..10 {
            assert_eq!(CongestionDijkstra.find_route(&snap, a, d).unwrap(), first);
        }
        // Lower EdgeId wins the tie: B (1) is settled before C (2).
        assert_eq!(first.edges[0], b);
    }

    #[test]
    fn free_flow_is_plain_shortest_path() {
        let (net, [a, _, c, e, d]) = super::helpers::long_vs_short();
        let r = CongestionDijkstra
            .find_route(&NetworkSnapshot::free_flow(&net), a, d)
            .unwrap();
        assert_eq!(r.edges, vec![c, e, d]);
        assert_eq!(r.cost, 10.0 + 100.0 + 100.0 + 50.0);
    }

    #[test]
    fn more_occupancy_never_cheaper() {
        let (net, [a, _, c, _, d]) = super::helpers::long_vs_short();
        let mut last = 0.0;
        for count in [0, 1, 10, 100, 10_000, 100_000] {
            let snap = NetworkSnapshot::free_flow(&net).with_occupancy(c, count);
            let cost = CongestionDijkstra.find_route(&snap, a, d).unwrap().cost;
            assert!(cost >= last, "cost dropped from {last} to {cost} at occupancy {count}");
            last = cost;
        }
    }

    #[test]
    fn dead_end_reports_path_not_found() {
        let (net, [a, b, _, d]) = super::helpers::diamond();
        let snap = NetworkSnapshot::free_flow(&net);
        // D has no outgoing edges.
        assert!(matches!(
            CongestionDijkstra.find_route(&snap, d, a),
            Err(NetworkError::PathNotFound { from, to }) if from == d && to == a
        ));
        // B only leads forward to D.
        assert!(CongestionDijkstra.find_route(&snap, b, a).is_err());
    }

    #[test]
    fn unknown_endpoints() {
        let (net, [a, ..]) = super::helpers::diamond();
        let snap = NetworkSnapshot::free_flow(&net);
        assert!(matches!(
            CongestionDijkstra.find_route(&snap, EdgeId::INVALID, a),
            Err(NetworkError::UnknownEdge(EdgeId::INVALID))
        ));
        assert!(matches!(
            CongestionDijkstra.find_route(&snap, a, EdgeId(50)),
            Err(NetworkError::UnknownEdge(_))
        ));
    }

    #[test]
    fn reachable_zero_length_aborts() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("a", 10.0).unwrap();
        let bad = b.add_edge("bad", 0.0).unwrap();
        let d = b.add_edge("d", 10.0).unwrap();
        b.connect(a, Direction::Straight, bad).unwrap();
        b.connect(bad, Direction::Straight, d).unwrap();
        let net = b.build();
        let snap = NetworkSnapshot::free_flow(&net);
        assert!(matches!(
            CongestionDijkstra.find_route(&snap, a, d),
            Err(NetworkError::InvalidEdgeLength { edge, .. }) if edge == bad
        ));
    }

    #[test]
    fn bad_start_length_aborts() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("a", -1.0).unwrap();
        let d = b.add_edge("d", 10.0).unwrap();
        b.connect(a, Direction::Straight, d).unwrap();
        let net = b.build();
        let err = CongestionDijkstra
            .find_route(&NetworkSnapshot::free_flow(&net), a, d)
            .unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn unreachable_bad_edge_is_ignored() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("a", 10.0).unwrap();
        let d = b.add_edge("d", 10.0).unwrap();
        let island = b.add_edge("island", 0.0).unwrap();
        b.connect(a, Direction::Straight, d).unwrap();
        b.connect(island, Direction::Straight, a).unwrap();
        let net = b.build();
        let r = CongestionDijkstra
            .find_route(&NetworkSnapshot::free_flow(&net), a, d)
            .unwrap();
        assert_eq!(r.edges, vec![d]);
    }

    #[test]
    fn route_walks_back_to_same_edges() {
        let (net, [a, _, _, _, d]) = super::helpers::long_vs_short();
        let r = CongestionDijkstra
            .find_route(&NetworkSnapshot::free_flow(&net), a, d)
            .unwrap();
        let mut cur = a;
        for (dir, expected) in r.directions.iter().zip(&r.edges) {
            cur = net.next_edge(cur, *dir).unwrap();
            assert_eq!(cur, *expected);
        }
        assert_eq!(cur, d);
    }
}

// ── Local-target resolution ───────────────────────────────────────────────────

#[cfg(test)]
mod target {
    use tr_core::{Direction, Vehicle};

    use crate::{DistanceThresholdResolver, LocalTargetResolver};

    const S: Direction = Direction::Straight;

    #[test]
    fn empty_directions_keep_current_edge() {
        let (net, [e0, _, _, e3]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e3, 10.0);
        let t = DistanceThresholdResolver::new(100.0).resolve(&net, &v, &[]);
        assert_eq!(t.edge, e0);
        assert_eq!(t.steps, 0);
        assert_eq!(t.distance, 0.0);
    }

    #[test]
    fn arrived_vehicle_stays_put() {
        let (net, [e0, ..]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e0, 10.0);
        let t = DistanceThresholdResolver::new(50.0).resolve(&net, &v, &[]);
        assert_eq!(t.edge, e0);
    }

    #[test]
    fn stops_once_threshold_cleared() {
        let (net, [e0, _, e2, e3]) = super::helpers::chain();
        // Destination far away so only the threshold ends the walk.
        let v = Vehicle::new("v", e0, e3, 10.0);
        let t = DistanceThresholdResolver::new(70.0).resolve(&net, &v, &[S, S, S]);
        assert_eq!(t.edge, e2); // 40 + 40 = 80 >= 70
        assert_eq!(t.steps, 2);
        assert_eq!(t.distance, 80.0);
    }

    #[test]
    fn exhausted_list_returns_last_edge() {
        let (net, [e0, e1, _, e3]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e3, 10.0);
        let t = DistanceThresholdResolver::new(1_000.0).resolve(&net, &v, &[S]);
        assert_eq!(t.edge, e1);
        assert_eq!(t.steps, 1);
    }

    #[test]
    fn unavailable_turn_returns_last_reachable() {
        let (net, [e0, e1, _, e3]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e3, 10.0);
        let t = DistanceThresholdResolver::new(1_000.0).resolve(&net, &v, &[S, Direction::Left, S]);
        assert_eq!(t.edge, e1);
        assert_eq!(t.steps, 1);
    }

    #[test]
    fn destination_ends_walk_early() {
        let (net, [e0, e1, _, _]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e1, 10.0);
        let t = DistanceThresholdResolver::new(1_000.0).resolve(&net, &v, &[S, S, S]);
        assert_eq!(t.edge, e1);
        assert_eq!(t.steps, 1);
    }

    #[test]
    fn zero_threshold_takes_one_step() {
        let (net, [e0, e1, _, e3]) = super::helpers::chain();
        let v = Vehicle::new("v", e0, e3, 10.0);
        let t = DistanceThresholdResolver::new(0.0).resolve(&net, &v, &[S, S]);
        assert_eq!(t.edge, e1);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tr_core::Direction;

    use crate::{NetworkError, load_network_reader};

    const EDGES: &str = "\
edge_id,length\n\
in,50\n\
left,75.5\n\
right,60\n\
";

    #[test]
    fn loads_edges_and_turns() {
        let conns = "from,direction,to\nin,l,left\nin,R,right\n";
        let net = load_network_reader(Cursor::new(EDGES), Cursor::new(conns)).unwrap();
        assert_eq!(net.edge_count(), 3);
        let input = net.edge_id("in").unwrap();
        assert_eq!(net.length(net.edge_id("left").unwrap()), Some(75.5));
        assert_eq!(net.next_edge(input, Direction::Left), net.edge_id("left"));
        assert_eq!(net.next_edge(input, Direction::SlightRight), net.edge_id("right"));
        assert_eq!(net.next_edge(input, Direction::Right), None);
    }

    #[test]
    fn bad_direction_symbol() {
        let conns = "from,direction,to\nin,x,left\n";
        let err = load_network_reader(Cursor::new(EDGES), Cursor::new(conns)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn connection_to_undeclared_edge() {
        let conns = "from,direction,to\nin,s,ghost\n";
        let err = load_network_reader(Cursor::new(EDGES), Cursor::new(conns)).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownEdgeName(n) if n == "ghost"));
    }

    #[test]
    fn malformed_length() {
        let edges = "edge_id,length\nin,abc\n";
        let err = load_network_reader(Cursor::new(edges), Cursor::new("from,direction,to\n")).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let edges = dir.path().join("edges.csv");
        let conns = dir.path().join("connections.csv");
        std::fs::write(&edges, EDGES).unwrap();
        std::fs::write(&conns, "from,direction,to\nin,s,left\n").unwrap();
        let net = crate::load_network_csv(&edges, &conns).unwrap();
        assert_eq!(net.out_degree(net.edge_id("in").unwrap()), 1);
    }
}
