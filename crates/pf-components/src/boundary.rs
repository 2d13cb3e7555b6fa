//! Virtual edges that close a network at its inlets and outlets.

use crate::error::{ComponentError, ComponentResult};
use crate::traits::{EdgeStates, NetworkEdge};
use pf_core::units::{Area, Pressure, VolumeRate, m2, m3ps, pa};
use pf_graph::BoundaryKind;

/// Closure edge attached to an inlet or outlet vertex.
///
/// A boundary edge has no geometry and no pressure loss. It carries its own
/// volumetric flow, which the solver treats as an unknown unless it has been
/// marked known. One end of the edge is a ghost vertex that exists only so
/// the edge has somewhere to point.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryEdge {
    name: String,
    kind: BoundaryKind,
    flow: VolumeRate,
}

impl BoundaryEdge {
    /// Zero-flow boundary edge.
    pub fn new(name: impl Into<String>, kind: BoundaryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flow: m3ps(0.0),
        }
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn flow(&self) -> VolumeRate {
        self.flow
    }

    pub fn set_flow(&mut self, flow: VolumeRate) {
        self.flow = flow;
    }
}

impl NetworkEdge for BoundaryEdge {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        m2(0.0)
    }

    fn delta_pressure(&self, _states: EdgeStates<'_>) -> ComponentResult<Pressure> {
        Ok(pa(0.0))
    }

    fn volumetric_flow(&self, _states: EdgeStates<'_>) -> VolumeRate {
        self.flow
    }

    /// Boundary edges never contribute an energy equation.
    fn bernoulli_balance(&self, _states: EdgeStates<'_>) -> ComponentResult<Pressure> {
        Err(ComponentError::NotSupported {
            what: "Bernoulli balance across a boundary edge",
        })
    }

    fn is_boundary(&self) -> bool {
        true
    }

    fn as_boundary(&self) -> Option<&BoundaryEdge> {
        Some(self)
    }

    fn as_boundary_mut(&mut self) -> Option<&mut BoundaryEdge> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::kg_m3;
    use pf_fluids::FluidState;

    #[test]
    fn carries_its_own_flow() {
        let mut edge = BoundaryEdge::new("in", BoundaryKind::Inlet);
        let u = FluidState::water().with_density(kg_m3(850.0));
        let v = FluidState::water();
        let states = EdgeStates::new(&u, &v);

        assert_eq!(edge.volumetric_flow(states).value, 0.0);
        edge.set_flow(m3ps(0.25));
        assert_eq!(edge.flow().value, 0.25);
        assert_eq!(edge.volumetric_flow(states).value, 0.25);
        assert!((edge.mass_flow(states).value - 212.5).abs() < 1e-9);
    }

    #[test]
    fn no_loss_and_no_energy_equation() {
        let edge = BoundaryEdge::new("out", BoundaryKind::Outlet);
        let s = FluidState::water();
        let states = EdgeStates::new(&s, &s);
        assert_eq!(edge.delta_pressure(states).unwrap().value, 0.0);
        assert_eq!(edge.cross_section().value, 0.0);
        assert!(matches!(
            edge.bernoulli_balance(states),
            Err(ComponentError::NotSupported { .. })
        ));
    }

    #[test]
    fn downcasts_to_itself() {
        let mut edge = BoundaryEdge::new("out", BoundaryKind::Outlet);
        assert!(edge.is_boundary());
        assert_eq!(edge.kind(), BoundaryKind::Outlet);
        assert!(edge.as_boundary().is_some());
        if let Some(b) = edge.as_boundary_mut() {
            b.set_flow(m3ps(1.5));
        }
        assert_eq!(edge.flow().value, 1.5);
    }
}
