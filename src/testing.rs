//! Structural invariant checks used by the unit tests.

use crate::engine::GraphCore;
use crate::Vertex;

/// Asserts every structural invariant of the engine.
///
/// Checks that mirror positions point back at each other, that the self-loop counters and degree
/// sums agree with the stored entries, that the index resolves every vertex to its slot, and that
/// materialized existence sets agree with the adjacency arrays.
pub(crate) fn assert_consistent<VL, EL>(g: &GraphCore<VL, EL>) {
    let directed = g.is_directed();
    let mut entries = 0;
    let mut pred_entries = 0;
    let mut loops = 0;

    for (slot, &v) in g.vertices().iter().enumerate() {
        assert_eq!(g.index_of(v), Some(slot), "vertex {v} does not resolve to its slot");
        let record = g.record(slot);
        let out = &record.out;
        entries += out.len();
        pred_entries += record.pred.len();

        let own_loops = out.targets().iter().filter(|&&u| u == v).count();
        assert_eq!(record.self_loops, own_loops, "self-loop counter of {v}");
        loops += own_loops;

        for pos in 0..out.len() {
            let u = out.target(pos);
            let mirror = out.mirror(pos);
            let su = g.index_of(u).unwrap_or_else(|| panic!("{v} refers to absent vertex {u}"));
            if directed {
                let pred = &g.record(su).pred;
                assert_eq!(pred.targets[mirror], v, "predecessor entry of arc {v}->{u}");
                assert_eq!(pred.mirror[mirror], pos, "predecessor mirror of arc {v}->{u}");
            } else if u == v {
                assert_eq!(mirror, pos, "self-loop at {v} must mirror onto itself");
            } else {
                let back = &g.record(su).out;
                assert_eq!(back.target(mirror), v, "reciprocal entry of edge {v}-{u}");
                assert_eq!(back.mirror(mirror), pos, "reciprocal mirror of edge {v}-{u}");
            }
        }

        for (q, (&w, &r)) in record.pred.targets.iter().zip(&record.pred.mirror).enumerate() {
            assert!(directed, "undirected vertex {v} has predecessors");
            let sw = g.index_of(w).unwrap_or_else(|| panic!("{v} has absent predecessor {w}"));
            let source = &g.record(sw).out;
            assert_eq!(source.target(r), v, "successor entry of arc {w}->{v}");
            assert_eq!(source.mirror(r), q, "successor mirror of arc {w}->{v}");
        }

        if let Some(set) = record.existence.get() {
            for &u in g.vertices() {
                assert_eq!(
                    set.contains(u),
                    out.targets().contains(&u),
                    "existence set of {v} disagrees on {u}"
                );
            }
        }
    }

    if directed {
        assert_eq!(entries, g.num_edges());
        assert_eq!(pred_entries, g.num_edges());
    } else {
        // Self-loops are stored once, every other edge twice.
        assert_eq!(entries - loops, 2 * (g.num_edges() - loops));
        let degrees: usize = (0..g.num_vertices()).map(|slot| g.degree_at(slot)).sum();
        assert_eq!(degrees, 2 * g.num_edges());
    }
}

/// Whether `u` is among the stored neighbours of `v`, without consulting the existence set.
pub(crate) fn scan_contains<VL, EL>(g: &GraphCore<VL, EL>, v: Vertex, u: Vertex) -> bool {
    g.index_of(v)
        .map_or(false, |slot| g.record(slot).out.targets().contains(&u))
}

mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::config::{Capabilities, GraphConfig};

    #[derive(Debug, Clone)]
    enum Op {
        AddEdge(Vertex, Vertex),
        RemoveEdge(Vertex, Vertex),
        RemoveVertex(Vertex),
        Query(Vertex, Vertex),
    }

    const N: Vertex = 12;

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..N, 0..N).prop_map(|(v, u)| Op::AddEdge(v, u)),
            2 => (0..N, 0..N).prop_map(|(v, u)| Op::RemoveEdge(v, u)),
            1 => (0..N).prop_map(Op::RemoveVertex),
            2 => (0..N, 0..N).prop_map(|(v, u)| Op::Query(v, u)),
        ]
    }

    fn capabilities() -> impl Strategy<Value = Capabilities> {
        prop_oneof![
            Just(Capabilities::GRAPH),
            Just(Capabilities::DIGRAPH),
            Just(Capabilities::MULTIGRAPH),
            Just(Capabilities::DIRECTED_MULTIGRAPH),
            Just(Capabilities::PSEUDOGRAPH),
            Just(Capabilities::DIRECTED_PSEUDOGRAPH),
        ]
    }

    /// Vertex numberings exercising every index strategy.
    fn numbering() -> impl Strategy<Value = Vec<Vertex>> {
        prop_oneof![
            Just((0..N).collect::<Vec<_>>()),
            Just((0..N).rev().map(|v| 3 * v + 1).collect::<Vec<_>>()),
            Just((0..N).map(|v| v << 27).collect::<Vec<_>>()),
        ]
    }

    proptest! {
        #[test]
        fn mutations_keep_invariants(
            capabilities in capabilities(),
            vertices in numbering(),
            ops in prop::collection::vec(op(), 0..120),
        ) {
            let config = GraphConfig::new().with_capabilities(capabilities);
            let mut g: GraphCore = GraphCore::new(config, vertices.iter().copied()).unwrap();
            let name = |i: Vertex| vertices[i as usize];

            for op in ops {
                match op {
                    Op::AddEdge(v, u) => {
                        let present = g.contains_edge(name(v), name(u));
                        match g.add_edge(name(v), name(u)) {
                            Ok(Some(_)) => {
                                prop_assert!(capabilities.multi_edges || !present);
                                prop_assert!(capabilities.self_loops || v != u);
                            }
                            Ok(None) => {
                                prop_assert!(
                                    (present && !capabilities.multi_edges)
                                        || (v == u && !capabilities.self_loops)
                                );
                            }
                            Err(_) => prop_assert!(g.index_of(name(v)).is_none()
                                || g.index_of(name(u)).is_none()),
                        }
                    }
                    Op::RemoveEdge(v, u) => {
                        let present = g.contains_edge(name(v), name(u));
                        prop_assert_eq!(g.remove_edge(name(v), name(u)).is_ok(), present);
                    }
                    Op::RemoveVertex(v) => {
                        let present = g.index_of(name(v)).is_some();
                        prop_assert_eq!(g.remove_vertex(name(v)).is_ok(), present);
                    }
                    Op::Query(v, u) => {
                        let (v, u) = (name(v), name(u));
                        let contained = g.contains_edge(v, u);
                        prop_assert_eq!(contained, scan_contains(&g, v, u));
                        if !capabilities.directed {
                            prop_assert_eq!(contained, g.contains_edge(u, v));
                        }
                    }
                }
            }
            assert_consistent(&g);
        }

        #[test]
        fn vertex_removal_preserves_survivors(
            edges in prop::collection::vec((0..N, 0..N), 0..60),
            removed in 0..N,
        ) {
            let config = GraphConfig::new().with_capabilities(Capabilities::DIGRAPH);
            let mut g: GraphCore<Vertex, ()> = GraphCore::with_num_vertices(config, N as usize);
            for v in 0..N {
                g.set_vertex_label(v, Some(v * 10)).unwrap();
            }
            for (v, u) in edges {
                g.add_edge(v, u).unwrap();
            }
            let last = g.vertex_at(N as usize - 1).unwrap();
            let mut expected: Vec<Vertex> = g.neighbors(last).unwrap().to_vec();
            expected.retain(|&u| u != removed);

            g.remove_vertex(removed).unwrap();
            for v in (0..N).filter(|&v| v != removed) {
                let slot = g.index_of(v);
                prop_assert!(slot.is_some());
                prop_assert_eq!(g.vertex_at(slot.unwrap()), Some(v));
                prop_assert_eq!(g.vertex_label(v).unwrap(), Some(&(v * 10)));
            }
            if last != removed {
                let mut after = g.neighbors(last).unwrap().to_vec();
                after.sort_unstable();
                expected.sort_unstable();
                prop_assert_eq!(after, expected);
            }
            assert_consistent(&g);
        }

        #[test]
        fn existence_set_agrees_with_scan(
            edges in prop::collection::vec((0..N, 0..N), 0..80),
            queries in prop::collection::vec((0..N, 0..N), 1..40),
        ) {
            let config = GraphConfig::new().with_capabilities(Capabilities::MULTIGRAPH);
            let mut g: GraphCore = GraphCore::with_num_vertices(config, N as usize);
            for (v, u) in edges {
                g.add_edge(v, u).unwrap();
            }
            for (v, u) in queries {
                prop_assert_eq!(g.contains_edge(v, u), scan_contains(&g, v, u));
            }
            // The first round materialized existence sets on high-degree vertices.
            for v in 0..N {
                if let Some(&u) = g.neighbors(v).unwrap().first() {
                    g.remove_edge(v, u).unwrap();
                    prop_assert_eq!(g.contains_edge(v, u), scan_contains(&g, v, u));
                }
            }
            assert_consistent(&g);
        }
    }
}
