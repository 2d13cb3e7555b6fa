//! pf-graph: directed graph store for pipeflow.
//!
//! Provides:
//! - `FlowGraph`, a typed wrapper over a petgraph `DiGraph` keyed by
//!   `VertexId` / `EdgeId`
//! - Degree queries and adjacency iteration in both directions
//! - Inlet/outlet classification and boundary-closure validation
//!
//! Nothing is ever removed from the graph, so ids handed out stay valid and
//! edge ids follow insertion order.
//!
//! # Example
//!
//! ```
//! use pf_graph::{BoundaryKind, FlowGraph};
//!
//! let mut graph: FlowGraph<&str, &str> = FlowGraph::new();
//! let a = graph.add_vertex("inlet");
//! let b = graph.add_vertex("outlet");
//! graph.add_edge(a, b, "pipe").unwrap();
//!
//! assert_eq!(graph.boundary_kind(a), Some(BoundaryKind::Inlet));
//! assert_eq!(graph.boundary_kind(b), Some(BoundaryKind::Outlet));
//! ```

pub mod error;
pub mod graph;
pub mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{BoundaryKind, FlowGraph};
pub use validate::validate_closable;
