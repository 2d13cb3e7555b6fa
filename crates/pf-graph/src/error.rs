//! Graph-specific error types.

use pf_core::{EdgeId, PfError, VertexId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph lookup and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No vertex with this id exists.
    #[error("Vertex {vertex} does not exist")]
    VertexNotFound { vertex: VertexId },

    /// No edge with this id exists.
    #[error("Edge {edge} does not exist")]
    EdgeNotFound { edge: EdgeId },

    /// A vertex has no incident edges at all.
    #[error("Vertex {vertex} has no incident edges")]
    IsolatedVertex { vertex: VertexId },

    /// A connected component has no vertex with in-degree 0.
    #[error("Component containing vertex {component_root} has no inlet (in-degree 0 vertex)")]
    MissingInlet { component_root: VertexId },

    /// A connected component has no vertex with out-degree 0.
    #[error("Component containing vertex {component_root} has no outlet (out-degree 0 vertex)")]
    MissingOutlet { component_root: VertexId },
}

impl From<GraphError> for PfError {
    fn from(err: GraphError) -> Self {
        PfError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_id() {
        let err = GraphError::VertexNotFound {
            vertex: VertexId::from_index(12),
        };
        assert!(err.to_string().contains("12"));

        let err = GraphError::MissingOutlet {
            component_root: VertexId::from_index(3),
        };
        assert!(err.to_string().contains("outlet"));
    }

    #[test]
    fn is_a_std_error() {
        let err = GraphError::IsolatedVertex {
            vertex: VertexId::from_index(4),
        };
        let dyn_err: &dyn std::error::Error = &err;
        assert_eq!(dyn_err.to_string(), "Vertex 4 has no incident edges");
        assert!(dyn_err.source().is_none());
    }

    #[test]
    fn converts_to_core_error() {
        let err: PfError = GraphError::EdgeNotFound {
            edge: EdgeId::from_index(0),
        }
        .into();
        assert!(matches!(err, PfError::Invariant { .. }));
    }
}
