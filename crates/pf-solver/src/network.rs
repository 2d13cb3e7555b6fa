//! The network container: vertex states, edges and variable classification.

use crate::classify::Classification;
use crate::error::{SolverError, SolverResult};
use pf_components::{BoundaryEdge, EdgeStates, NetworkEdge};
use pf_core::units::{Pressure, Velocity, VolumeRate};
use pf_core::{EdgeId, VertexId};
use pf_fluids::FluidState;
use pf_graph::{BoundaryKind, FlowGraph, GraphError, validate_closable};
use tracing::debug;

/// How the mass balance of true inlet/outlet vertices enters the residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryBalance {
    /// One aggregate inflow balance over all inlets and one aggregate
    /// outflow balance over all outlets.
    #[default]
    Lumped,
    /// One balance per inlet vertex and one per outlet vertex.
    PerVertex,
}

/// A boundary edge synthesized by [`Network::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryLink {
    pub edge: EdgeId,
    pub kind: BoundaryKind,
    /// The true network vertex the edge closes.
    pub vertex: VertexId,
    /// The ghost vertex on the far side of the edge.
    pub ghost: VertexId,
}

/// Role a vertex plays in the mass-balance part of the residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VertexRole {
    Interior,
    Boundary(BoundaryKind),
    Ghost,
}

/// Directed network of fluid states joined by edges.
///
/// Vertex states live in the graph arena; edges refer to their endpoints by
/// id and borrow the states only while they are evaluated. Vertices exist
/// from construction. Edges are added until [`Network::initialize`] seals the
/// network by closing every inlet and outlet with a [`BoundaryEdge`].
#[derive(Debug)]
pub struct Network {
    pub(crate) graph: FlowGraph<FluidState, Box<dyn NetworkEdge>>,
    pub(crate) speeds: Classification<VertexId>,
    pub(crate) pressures: Classification<VertexId>,
    pub(crate) flows: Classification<EdgeId>,
    /// Vertices below this index were created by the caller; the rest are ghosts.
    real_vertices: usize,
    boundary: Vec<BoundaryLink>,
    balance: BoundaryBalance,
    initialized: bool,
}

impl Network {
    /// Create `n` vertices, each holding its own copy of `default_state`.
    ///
    /// Every speed and static pressure starts out unknown.
    pub fn new(default_state: FluidState, n: usize) -> Self {
        let mut graph = FlowGraph::with_capacity(n, n);
        let ids: Vec<VertexId> = (0..n).map(|_| graph.add_vertex(default_state)).collect();
        Self {
            graph,
            speeds: Classification::all_unknown(ids.iter().copied()),
            pressures: Classification::all_unknown(ids),
            flows: Classification::default(),
            real_vertices: n,
            boundary: Vec::new(),
            balance: BoundaryBalance::default(),
            initialized: false,
        }
    }

    /// Builder-style choice of boundary mass-balance form.
    pub fn with_boundary_balance(mut self, balance: BoundaryBalance) -> Self {
        self.balance = balance;
        self
    }

    pub fn boundary_balance(&self) -> BoundaryBalance {
        self.balance
    }

    pub fn set_boundary_balance(&mut self, balance: BoundaryBalance) {
        self.balance = balance;
    }

    /// Insert a directed edge `u → v`.
    ///
    /// Fails if either vertex is missing, if the network is already
    /// initialized, or if `edge` is a boundary edge (those are only created
    /// by `initialize`).
    pub fn add_edge<E>(&mut self, edge: E, u: VertexId, v: VertexId) -> SolverResult<EdgeId>
    where
        E: NetworkEdge + 'static,
    {
        if self.initialized {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "cannot add edge '{}' after the network was initialized",
                    edge.name()
                ),
            });
        }
        if edge.is_boundary() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "boundary edge '{}' must be created by initialize",
                    edge.name()
                ),
            });
        }
        Ok(self.graph.add_edge(u, v, Box::new(edge))?)
    }

    /// Fix the speed at `vertex`.
    pub fn mark_known_speed(&mut self, vertex: VertexId, value: Velocity) -> SolverResult<()> {
        self.require_real_vertex(vertex)?;
        self.state_mut(vertex)?.set_speed(value);
        self.speeds.mark_known(vertex);
        Ok(())
    }

    /// Fix the static pressure at `vertex`.
    pub fn mark_known_pressure(&mut self, vertex: VertexId, value: Pressure) -> SolverResult<()> {
        self.require_real_vertex(vertex)?;
        self.state_mut(vertex)?.set_static_pressure(value);
        self.pressures.mark_known(vertex);
        Ok(())
    }

    /// Fix the volumetric flow carried by a boundary edge.
    pub fn mark_known_boundary_flow(&mut self, edge: EdgeId, value: VolumeRate) -> SolverResult<()> {
        self.boundary_edge_mut(edge)?.set_flow(value);
        self.flows.mark_known(edge);
        Ok(())
    }

    /// Close the network at its inlets and outlets.
    ///
    /// Every vertex with in-degree 0 gets a ghost vertex and a boundary edge
    /// `ghost → vertex`; every vertex with out-degree 0 gets `vertex → ghost`.
    /// Each new edge's flow becomes an unknown. Fails if some connected
    /// component lacks an inlet or an outlet. Calling it again is a no-op.
    pub fn initialize(&mut self) -> SolverResult<()> {
        if self.initialized {
            return Ok(());
        }
        validate_closable(&self.graph)?;

        let targets: Vec<(VertexId, BoundaryKind)> = self
            .graph
            .vertex_ids()
            .filter_map(|v| self.graph.boundary_kind(v).map(|kind| (v, kind)))
            .collect();

        for (vertex, kind) in targets {
            let state = *self.state(vertex)?;
            let ghost = self.graph.add_vertex(state);
            let (name, u, v) = match kind {
                BoundaryKind::Inlet => (format!("inlet-{vertex}"), ghost, vertex),
                BoundaryKind::Outlet => (format!("outlet-{vertex}"), vertex, ghost),
            };
            let edge = self
                .graph
                .add_edge(u, v, Box::new(BoundaryEdge::new(name, kind)))?;
            self.flows.insert_unknown(edge);
            self.boundary.push(BoundaryLink {
                edge,
                kind,
                vertex,
                ghost,
            });
        }
        self.initialized = true;

        debug!(
            inlets = self.inlets().len(),
            outlets = self.outlets().len(),
            unknowns = self.unknown_count(),
            equations = self.equation_count(),
            "network initialized"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Total vertex count, ghosts included.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Total edge count, boundary edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.vertex_ids()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.edge_ids()
    }

    pub fn state(&self, vertex: VertexId) -> SolverResult<&FluidState> {
        self.graph
            .vertex(vertex)
            .ok_or(SolverError::Graph(GraphError::VertexNotFound { vertex }))
    }

    /// Mutable access to a vertex state.
    ///
    /// Writing a value does not change its known/unknown classification.
    pub fn state_mut(&mut self, vertex: VertexId) -> SolverResult<&mut FluidState> {
        self.graph
            .vertex_mut(vertex)
            .ok_or(SolverError::Graph(GraphError::VertexNotFound { vertex }))
    }

    pub fn edge(&self, edge: EdgeId) -> SolverResult<&dyn NetworkEdge> {
        self.graph
            .edge(edge)
            .map(|e| &**e)
            .ok_or(SolverError::Graph(GraphError::EdgeNotFound { edge }))
    }

    /// `(upstream, downstream)` vertices of an edge.
    pub fn edge_endpoints(&self, edge: EdgeId) -> SolverResult<(VertexId, VertexId)> {
        self.graph
            .endpoints(edge)
            .ok_or(SolverError::Graph(GraphError::EdgeNotFound { edge }))
    }

    /// Edge running `u → v`, or `None` if the two vertices are not joined
    /// in that direction. Missing vertices are an error.
    pub fn find_edge(&self, u: VertexId, v: VertexId) -> SolverResult<Option<EdgeId>> {
        self.graph.require_vertex(u)?;
        self.graph.require_vertex(v)?;
        Ok(self.graph.find_edge(u, v))
    }

    /// Borrow an edge together with its endpoint states.
    pub fn edge_with_states(&self, edge: EdgeId) -> SolverResult<(&dyn NetworkEdge, EdgeStates<'_>)> {
        let (u, v) = self.edge_endpoints(edge)?;
        Ok((self.edge(edge)?, EdgeStates::new(self.state(u)?, self.state(v)?)))
    }

    pub(crate) fn boundary_edge_mut(&mut self, edge: EdgeId) -> SolverResult<&mut BoundaryEdge> {
        self.graph
            .edge_mut(edge)
            .ok_or(SolverError::Graph(GraphError::EdgeNotFound { edge }))?
            .as_boundary_mut()
            .ok_or_else(|| SolverError::ProblemSetup {
                what: format!("edge {edge} is not a boundary edge"),
            })
    }

    /// Boundary edges created by `initialize`, in creation order.
    pub fn boundary_edges(&self) -> &[BoundaryLink] {
        &self.boundary
    }

    /// Whether `vertex` is a ghost created by `initialize`.
    pub fn is_ghost(&self, vertex: VertexId) -> bool {
        vertex.as_usize() >= self.real_vertices && self.graph.contains_vertex(vertex)
    }

    /// True inlet vertices (in-degree 0 before closure), in vertex order.
    pub fn inlets(&self) -> Vec<VertexId> {
        self.boundary_vertices(BoundaryKind::Inlet)
    }

    /// True outlet vertices (out-degree 0 before closure), in vertex order.
    pub fn outlets(&self) -> Vec<VertexId> {
        self.boundary_vertices(BoundaryKind::Outlet)
    }

    fn boundary_vertices(&self, kind: BoundaryKind) -> Vec<VertexId> {
        self.real_vertex_ids()
            .filter(|&v| self.role(v) == VertexRole::Boundary(kind))
            .collect()
    }

    pub(crate) fn real_vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph
            .vertex_ids()
            .take_while(|v| v.as_usize() < self.real_vertices)
    }

    pub(crate) fn role(&self, vertex: VertexId) -> VertexRole {
        if self.is_ghost(vertex) {
            return VertexRole::Ghost;
        }
        let kind = if self.initialized {
            self.boundary
                .iter()
                .find(|link| link.vertex == vertex)
                .map(|link| link.kind)
        } else {
            self.graph.boundary_kind(vertex)
        };
        kind.map_or(VertexRole::Interior, VertexRole::Boundary)
    }

    fn require_real_vertex(&self, vertex: VertexId) -> SolverResult<()> {
        self.graph.require_vertex(vertex)?;
        if self.is_ghost(vertex) {
            return Err(SolverError::ProblemSetup {
                what: format!("vertex {vertex} is a ghost and carries no unknowns"),
            });
        }
        Ok(())
    }

    pub fn known_speeds(&self) -> &[VertexId] {
        self.speeds.known()
    }

    pub fn unknown_speeds(&self) -> &[VertexId] {
        self.speeds.unknown()
    }

    pub fn known_pressures(&self) -> &[VertexId] {
        self.pressures.known()
    }

    pub fn unknown_pressures(&self) -> &[VertexId] {
        self.pressures.unknown()
    }

    pub fn known_boundary_flows(&self) -> &[EdgeId] {
        self.flows.known()
    }

    pub fn unknown_boundary_flows(&self) -> &[EdgeId] {
        self.flows.unknown()
    }

    /// Number of scalar unknowns: speeds, pressures and boundary flows.
    pub fn unknown_count(&self) -> usize {
        self.speeds.unknown().len() + self.pressures.unknown().len() + self.flows.unknown().len()
    }
}
