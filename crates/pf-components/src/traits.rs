//! Core traits for network edges.

use crate::boundary::BoundaryEdge;
use crate::error::ComponentResult;
use pf_core::units::{Area, MassRate, Pressure, VolumeRate};
use pf_fluids::FluidState;

/// Borrowed view of the two endpoint states of an edge.
///
/// Edges never own vertex state; the network lends both endpoints for the
/// duration of one evaluation, so every edge incident on a vertex reads the
/// same state.
#[derive(Clone, Copy, Debug)]
pub struct EdgeStates<'a> {
    /// Upstream vertex (edge source).
    pub u: &'a FluidState,
    /// Downstream vertex (edge target).
    pub v: &'a FluidState,
}

impl<'a> EdgeStates<'a> {
    pub fn new(u: &'a FluidState, v: &'a FluidState) -> Self {
        Self { u, v }
    }
}

/// An edge of the flow network connecting upstream vertex `u` to downstream
/// vertex `v`.
///
/// All quantities are pure functions of the edge parameters and the borrowed
/// endpoint states.
pub trait NetworkEdge: Send + Sync + std::fmt::Debug {
    /// Edge name for debugging and identification.
    fn name(&self) -> &str;

    /// Flow area of the edge.
    fn cross_section(&self) -> Area;

    /// Pressure lost between `u` and `v`.
    fn delta_pressure(&self, states: EdgeStates<'_>) -> ComponentResult<Pressure>;

    /// Volumetric flow, `cross_section · speed(u)` unless the edge carries its
    /// own flow.
    fn volumetric_flow(&self, states: EdgeStates<'_>) -> VolumeRate {
        self.cross_section() * states.u.speed()
    }

    /// Mass flow, `volumetric_flow · density(u)`.
    fn mass_flow(&self, states: EdgeStates<'_>) -> MassRate {
        self.volumetric_flow(states) * states.u.density()
    }

    /// Energy-conservation residual of this edge:
    /// `bernoulli_total(u) − bernoulli_total(v) − delta_pressure`.
    fn bernoulli_balance(&self, states: EdgeStates<'_>) -> ComponentResult<Pressure> {
        let dp = self.delta_pressure(states)?;
        Ok(states.u.bernoulli_total() - states.v.bernoulli_total() - dp)
    }

    /// Whether this is a virtual closure edge rather than a physical one.
    fn is_boundary(&self) -> bool {
        false
    }

    /// Downcast to a boundary edge.
    fn as_boundary(&self) -> Option<&BoundaryEdge> {
        None
    }

    /// Mutable downcast to a boundary edge.
    fn as_boundary_mut(&mut self) -> Option<&mut BoundaryEdge> {
        None
    }
}
