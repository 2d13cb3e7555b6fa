//! Integration tests for pf-graph.

use pf_core::{EdgeId, VertexId};
use pf_graph::{BoundaryKind, FlowGraph, GraphError, validate_closable};
use proptest::prelude::*;

#[test]
fn branching_network_classification() {
    // 0 -> 1, 1 -> 2, 1 -> 3
    let mut g: FlowGraph<&str, &str> = FlowGraph::new();
    let v0 = g.add_vertex("source");
    let v1 = g.add_vertex("tee");
    let v2 = g.add_vertex("drain a");
    let v3 = g.add_vertex("drain b");
    g.add_edge(v0, v1, "main").unwrap();
    g.add_edge(v1, v2, "branch a").unwrap();
    g.add_edge(v1, v3, "branch b").unwrap();

    assert_eq!(g.sources(), vec![v0]);
    assert_eq!(g.sinks(), vec![v2, v3]);
    assert_eq!(g.boundary_kind(v1), None);
    assert_eq!(g.boundary_kind(v3), Some(BoundaryKind::Outlet));
    assert_eq!(g.out_degree(v1), 2);
    assert!(validate_closable(&g).is_ok());
}

#[test]
fn parallel_edges_keep_separate_ids() {
    let mut g: FlowGraph<(), f64> = FlowGraph::new();
    let a = g.add_vertex(());
    let b = g.add_vertex(());
    let e0 = g.add_edge(a, b, 1.0).unwrap();
    let e1 = g.add_edge(a, b, 2.0).unwrap();

    assert_ne!(e0, e1);
    assert_eq!(g.outgoing(a), vec![e0, e1]);
    assert_eq!(g.incoming(b), vec![e0, e1]);
    assert_eq!(g.edge(e1), Some(&2.0));
}

#[test]
fn lookup_failures_are_explicit() {
    let g: FlowGraph<(), ()> = FlowGraph::new();
    assert_eq!(
        g.require_vertex(VertexId::from_index(0)),
        Err(GraphError::VertexNotFound {
            vertex: VertexId::from_index(0)
        })
    );
    assert_eq!(g.endpoints(EdgeId::from_index(0)), None);
}

proptest! {
    #[test]
    fn chain_of_any_length_has_one_inlet_and_one_outlet(len in 2usize..40) {
        let mut g: FlowGraph<usize, ()> = FlowGraph::new();
        let ids: Vec<_> = (0..len).map(|i| g.add_vertex(i)).collect();
        for w in ids.windows(2) {
            g.add_edge(w[0], w[1], ()).unwrap();
        }
        prop_assert_eq!(g.sources(), vec![ids[0]]);
        prop_assert_eq!(g.sinks(), vec![ids[len - 1]]);
        prop_assert_eq!(g.edge_count(), len - 1);
        prop_assert!(validate_closable(&g).is_ok());
    }
}
