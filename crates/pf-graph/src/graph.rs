//! Core graph data structures.

use pf_core::{EdgeId, VertexId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{GraphError, GraphResult};

/// Which side of the network a boundary vertex sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// In-degree 0: flow enters the network here.
    Inlet,
    /// Out-degree 0: flow leaves the network here.
    Outlet,
}

/// Append-only directed graph with labeled vertices and edges.
///
/// Vertex and edge weights are stored in petgraph's flat arrays, so a
/// `VertexId` is a plain index into the vertex arena and edges hold
/// endpoints by index rather than by ownership.
#[derive(Debug, Clone)]
pub struct FlowGraph<N, E> {
    inner: DiGraph<N, E, u32>,
}

impl<N, E> Default for FlowGraph<N, E> {
    fn default() -> Self {
        Self {
            inner: DiGraph::default(),
        }
    }
}

#[inline]
fn node_ix(id: VertexId) -> NodeIndex<u32> {
    NodeIndex::new(id.as_usize())
}

#[inline]
fn edge_ix(id: EdgeId) -> EdgeIndex<u32> {
    EdgeIndex::new(id.as_usize())
}

#[inline]
fn vertex_id(ix: NodeIndex<u32>) -> VertexId {
    VertexId::from_index(ix.index() as u32)
}

#[inline]
fn edge_id(ix: EdgeIndex<u32>) -> EdgeId {
    EdgeId::from_index(ix.index() as u32)
}

impl<N, E> FlowGraph<N, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with preallocated storage.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            inner: DiGraph::with_capacity(vertices, edges),
        }
    }

    /// Add a vertex and return its ID.
    pub fn add_vertex(&mut self, weight: N) -> VertexId {
        vertex_id(self.inner.add_node(weight))
    }

    /// Add a directed edge `u -> v` and return its ID.
    ///
    /// Parallel edges are allowed; each gets its own ID.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: E) -> GraphResult<EdgeId> {
        self.require_vertex(u)?;
        self.require_vertex(v)?;
        Ok(edge_id(self.inner.add_edge(node_ix(u), node_ix(v), weight)))
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether `id` names an existing vertex.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        id.as_usize() < self.inner.node_count()
    }

    /// Whether `id` names an existing edge.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        id.as_usize() < self.inner.edge_count()
    }

    /// Fail with `VertexNotFound` unless `id` exists.
    pub fn require_vertex(&self, id: VertexId) -> GraphResult<()> {
        if self.contains_vertex(id) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound { vertex: id })
        }
    }

    /// Fail with `EdgeNotFound` unless `id` exists.
    pub fn require_edge(&self, id: EdgeId) -> GraphResult<()> {
        if self.contains_edge(id) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound { edge: id })
        }
    }

    /// Get a vertex weight by ID (returns None if ID out of bounds).
    pub fn vertex(&self, id: VertexId) -> Option<&N> {
        self.inner.node_weight(node_ix(id))
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut N> {
        self.inner.node_weight_mut(node_ix(id))
    }

    /// Get an edge weight by ID (returns None if ID out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.inner.edge_weight(edge_ix(id))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.inner.edge_weight_mut(edge_ix(id))
    }

    /// Source and target of an edge.
    pub fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.inner
            .edge_endpoints(edge_ix(id))
            .map(|(u, v)| (vertex_id(u), vertex_id(v)))
    }

    /// Number of edges ending at `id` (0 for an unknown vertex).
    pub fn in_degree(&self, id: VertexId) -> usize {
        if !self.contains_vertex(id) {
            return 0;
        }
        self.inner
            .edges_directed(node_ix(id), Direction::Incoming)
            .count()
    }

    /// Number of edges starting at `id` (0 for an unknown vertex).
    pub fn out_degree(&self, id: VertexId) -> usize {
        if !self.contains_vertex(id) {
            return 0;
        }
        self.inner
            .edges_directed(node_ix(id), Direction::Outgoing)
            .count()
    }

    /// Edges ending at `id`, in insertion order.
    pub fn incoming(&self, id: VertexId) -> Vec<EdgeId> {
        self.adjacent(id, Direction::Incoming)
    }

    /// Edges starting at `id`, in insertion order.
    pub fn outgoing(&self, id: VertexId) -> Vec<EdgeId> {
        self.adjacent(id, Direction::Outgoing)
    }

    fn adjacent(&self, id: VertexId, dir: Direction) -> Vec<EdgeId> {
        if !self.contains_vertex(id) {
            return Vec::new();
        }
        // petgraph walks its adjacency lists newest-first
        let mut edges: Vec<EdgeId> = self
            .inner
            .edges_directed(node_ix(id), dir)
            .map(|e| edge_id(e.id()))
            .collect();
        edges.sort();
        edges
    }

    /// All vertex IDs in index order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.inner.node_indices().map(vertex_id)
    }

    /// All edge IDs in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.inner.edge_indices().map(edge_id)
    }

    /// Classify a vertex by its degrees.
    ///
    /// In-degree 0 wins over out-degree 0, so an isolated vertex reports
    /// `Inlet`; `validate_closable` rejects isolated vertices separately.
    pub fn boundary_kind(&self, id: VertexId) -> Option<BoundaryKind> {
        if !self.contains_vertex(id) {
            None
        } else if self.in_degree(id) == 0 {
            Some(BoundaryKind::Inlet)
        } else if self.out_degree(id) == 0 {
            Some(BoundaryKind::Outlet)
        } else {
            None
        }
    }

    /// Vertices with in-degree 0, in index order.
    pub fn sources(&self) -> Vec<VertexId> {
        self.vertex_ids()
            .filter(|&v| self.in_degree(v) == 0)
            .collect()
    }

    /// Vertices with out-degree 0, in index order.
    pub fn sinks(&self) -> Vec<VertexId> {
        self.vertex_ids()
            .filter(|&v| self.out_degree(v) == 0)
            .collect()
    }

    /// The first-inserted edge `u → v`, if any.
    ///
    /// Direction matters: an edge `v → u` does not match.
    pub fn find_edge(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        if !self.contains_vertex(u) || !self.contains_vertex(v) {
            return None;
        }
        self.inner
            .edges_connecting(node_ix(u), node_ix(v))
            .map(|e| edge_id(e.id()))
            .min()
    }
}
