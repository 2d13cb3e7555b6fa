//! Boundary-closure validation.

use pf_core::VertexId;
use petgraph::unionfind::UnionFind;

use crate::error::{GraphError, GraphResult};
use crate::graph::FlowGraph;

/// Check that boundary closure can square every part of the network.
///
/// Every weakly-connected component needs at least one inlet (in-degree 0)
/// and one outlet (out-degree 0), and no vertex may be isolated. Components
/// are reported by their lowest-index vertex.
pub fn validate_closable<N, E>(graph: &FlowGraph<N, E>) -> GraphResult<()> {
    let n = graph.vertex_count();

    for v in graph.vertex_ids() {
        if graph.in_degree(v) == 0 && graph.out_degree(v) == 0 {
            return Err(GraphError::IsolatedVertex { vertex: v });
        }
    }

    let mut components = UnionFind::<usize>::new(n);
    for e in graph.edge_ids() {
        if let Some((u, v)) = graph.endpoints(e) {
            components.union(u.as_usize(), v.as_usize());
        }
    }

    // Per component root: (lowest vertex, has inlet, has outlet)
    let mut summary: Vec<Option<(VertexId, bool, bool)>> = vec![None; n];
    for v in graph.vertex_ids() {
        let root = components.find(v.as_usize());
        let entry = summary[root].get_or_insert((v, false, false));
        entry.1 |= graph.in_degree(v) == 0;
        entry.2 |= graph.out_degree(v) == 0;
    }

    for (component_root, has_inlet, has_outlet) in summary.into_iter().flatten() {
        if !has_inlet {
            return Err(GraphError::MissingInlet { component_root });
        }
        if !has_outlet {
            return Err(GraphError::MissingOutlet { component_root });
        }
    }

    Ok(())
}
