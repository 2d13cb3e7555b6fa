//! Assembly of the nonlinear residual vector.
//!
//! Layout, in order:
//! 1. one Bernoulli balance per non-boundary edge, in edge insertion order
//! 2. one mass balance (in − out) per interior vertex, in vertex order
//! 3. the inflow balance(s), then the outflow balance(s), per
//!    [`BoundaryBalance`](crate::BoundaryBalance)

use crate::error::SolverResult;
use crate::network::{BoundaryBalance, Network, VertexRole};
use nalgebra::DVector;
use pf_core::VertexId;
use pf_core::units::{MassRate, kgps};
use pf_graph::BoundaryKind;

impl Network {
    /// Evaluate every residual equation at the current vertex and edge state.
    ///
    /// Bernoulli balances are in pascal, mass balances in kg/s. Any edge that
    /// cannot be evaluated (for example a zero upstream speed, which puts the
    /// friction law outside its domain) fails the whole evaluation.
    pub fn residual_vector(&self) -> SolverResult<DVector<f64>> {
        let mut r = Vec::with_capacity(self.equation_count());

        for e in self.graph.edge_ids() {
            let (edge, states) = self.edge_with_states(e)?;
            if !edge.is_boundary() {
                r.push(edge.bernoulli_balance(states)?.value);
            }
        }

        let mut inlets = Vec::new();
        let mut outlets = Vec::new();
        for v in self.real_vertex_ids() {
            match self.role(v) {
                VertexRole::Interior => r.push(self.mass_balance(v)?.value),
                VertexRole::Boundary(BoundaryKind::Inlet) => inlets.push(v),
                VertexRole::Boundary(BoundaryKind::Outlet) => outlets.push(v),
                VertexRole::Ghost => {}
            }
        }

        for group in [inlets, outlets] {
            match self.boundary_balance() {
                BoundaryBalance::Lumped if !group.is_empty() => {
                    let mut total = kgps(0.0);
                    for v in group {
                        total += self.mass_balance(v)?;
                    }
                    r.push(total.value);
                }
                BoundaryBalance::Lumped => {}
                BoundaryBalance::PerVertex => {
                    for v in group {
                        r.push(self.mass_balance(v)?.value);
                    }
                }
            }
        }

        Ok(DVector::from_vec(r))
    }

    /// Length of [`Network::residual_vector`], without evaluating it.
    pub fn equation_count(&self) -> usize {
        let edges = self
            .graph
            .edge_ids()
            .filter(|&e| self.edge(e).is_ok_and(|edge| !edge.is_boundary()))
            .count();

        let (mut interior, mut inlets, mut outlets) = (0, 0, 0);
        for v in self.real_vertex_ids() {
            match self.role(v) {
                VertexRole::Interior => interior += 1,
                VertexRole::Boundary(BoundaryKind::Inlet) => inlets += 1,
                VertexRole::Boundary(BoundaryKind::Outlet) => outlets += 1,
                VertexRole::Ghost => {}
            }
        }

        let boundary = match self.boundary_balance() {
            BoundaryBalance::Lumped => usize::from(inlets > 0) + usize::from(outlets > 0),
            BoundaryBalance::PerVertex => inlets + outlets,
        };
        edges + interior + boundary
    }

    /// Net mass flow into `vertex`: incoming minus outgoing.
    pub fn mass_balance(&self, vertex: VertexId) -> SolverResult<MassRate> {
        self.graph.require_vertex(vertex)?;
        let mut net = kgps(0.0);
        for e in self.graph.incoming(vertex) {
            let (edge, states) = self.edge_with_states(e)?;
            net += edge.mass_flow(states);
        }
        for e in self.graph.outgoing(vertex) {
            let (edge, states) = self.edge_with_states(e)?;
            net -= edge.mass_flow(states);
        }
        Ok(net)
    }
}
