//! Straight circular pipe with Darcy–Weisbach friction loss.

use crate::error::ComponentResult;
use crate::friction::{darcy_weisbach, haaland, reynolds};
use crate::traits::{EdgeStates, NetworkEdge};
use pf_core::units::{Area, Length, Pressure, Ratio, m};
use std::f64::consts::FRAC_PI_4;

/// Pipe segment whose loss follows Darcy–Weisbach with a Haaland friction
/// factor.
///
/// Fluid properties (density, viscosity) and the flow speed are read from the
/// upstream endpoint `u`. Geometry is not validated; a zero diameter or a
/// negative length simply propagates into the correlations.
#[derive(Debug, Clone, PartialEq)]
pub struct FrictionEdge {
    name: String,
    diameter: Length,
    length: Length,
    /// Absolute wall roughness.
    roughness: Length,
}

impl FrictionEdge {
    pub fn new(name: impl Into<String>, diameter: Length, length: Length, roughness: Length) -> Self {
        Self {
            name: name.into(),
            diameter,
            length,
            roughness,
        }
    }

    pub fn diameter(&self) -> Length {
        self.diameter
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn roughness(&self) -> Length {
        self.roughness
    }

    pub fn set_diameter(&mut self, diameter: Length) {
        self.diameter = diameter;
    }

    pub fn set_length(&mut self, length: Length) {
        self.length = length;
    }

    pub fn set_roughness(&mut self, roughness: Length) {
        self.roughness = roughness;
    }

    /// Resize the pipe to a given flow area, keeping it circular.
    pub fn set_cross_section(&mut self, area: Area) {
        self.diameter = m((area.value / FRAC_PI_4).sqrt());
    }

    /// `roughness / diameter`.
    pub fn relative_roughness(&self) -> Ratio {
        self.roughness / self.diameter
    }

    /// Reynolds number of the flow entering from `u`.
    pub fn reynolds(&self, states: EdgeStates<'_>) -> Ratio {
        let u = states.u;
        reynolds(u.speed(), self.diameter, u.density(), u.dynamic_viscosity())
    }

    /// Darcy friction factor at the current upstream state.
    pub fn friction_factor(&self, states: EdgeStates<'_>) -> ComponentResult<Ratio> {
        haaland(self.reynolds(states), self.relative_roughness())
    }
}

impl NetworkEdge for FrictionEdge {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        self.diameter * self.diameter * FRAC_PI_4
    }

    fn delta_pressure(&self, states: EdgeStates<'_>) -> ComponentResult<Pressure> {
        let f = self.friction_factor(states)?;
        let flow = self.volumetric_flow(states);
        Ok(darcy_weisbach(
            f,
            self.length,
            flow,
            states.u.density(),
            self.diameter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use pf_core::units::{m2, mps};
    use pf_fluids::FluidState;

    fn reference_pipe() -> FrictionEdge {
        FrictionEdge::new("pipe", m(0.2), m(20.0), m(4.6e-5))
    }

    #[test]
    fn reference_pipe_at_ten_mps() {
        let pipe = reference_pipe();
        let u = FluidState::water().with_speed(mps(10.0));
        let v = FluidState::water();
        let states = EdgeStates::new(&u, &v);

        assert!((pipe.cross_section().value - 0.031_415_9).abs() < 1e-6);
        assert!((pipe.volumetric_flow(states).value - 0.314_159).abs() < 1e-5);
        assert!((pipe.mass_flow(states).value - 314.159).abs() < 1e-2);
        assert!((pipe.relative_roughness().value - 0.00023).abs() < 1e-12);

        let dp = pipe.delta_pressure(states).unwrap();
        assert!((dp.value - 73_077.0).abs() < 1.0e3, "dp = {}", dp.value);
    }

    #[test]
    fn bernoulli_balance_subtracts_loss() {
        let pipe = reference_pipe();
        let u = FluidState::water().with_speed(mps(10.0));
        let v = FluidState::water().with_speed(mps(10.0));
        let states = EdgeStates::new(&u, &v);

        let dp = pipe.delta_pressure(states).unwrap();
        let balance = pipe.bernoulli_balance(states).unwrap();
        assert!((balance.value + dp.value).abs() < 1e-9);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let pipe = reference_pipe();
        let u = FluidState::water();
        let states = EdgeStates::new(&u, &u);

        assert_eq!(pipe.volumetric_flow(states).value, 0.0);
        let err = pipe.delta_pressure(states).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidPhysicalInput { .. }));
        assert!(pipe.bernoulli_balance(states).is_err());
    }

    #[test]
    fn set_cross_section_round_trips_diameter() {
        let mut pipe = reference_pipe();
        pipe.set_cross_section(m2(0.5));
        assert!((pipe.cross_section().value - 0.5).abs() < 1e-12);
        assert!((pipe.diameter().value - 0.797_884_560_8).abs() < 1e-9);
    }

    #[test]
    fn clone_is_independent() {
        let original = reference_pipe();
        let mut copy = original.clone();
        copy.set_length(m(40.0));
        copy.set_roughness(m(1.0e-3));
        assert_eq!(original.length().value, 20.0);
        assert_eq!(original.roughness().value, 4.6e-5);
        assert_ne!(copy, original);
    }

    #[test]
    fn longer_pipe_loses_more() {
        let short = reference_pipe();
        let mut long = reference_pipe();
        long.set_length(m(40.0));

        let u = FluidState::water().with_speed(mps(3.0));
        let states = EdgeStates::new(&u, &u);
        let dp_short = short.delta_pressure(states).unwrap().value;
        let dp_long = long.delta_pressure(states).unwrap().value;
        assert!((dp_long - 2.0 * dp_short).abs() < 1e-9 * dp_long);
    }

    #[test]
    fn friction_edge_is_not_boundary() {
        let mut pipe = reference_pipe();
        assert!(!pipe.is_boundary());
        assert!(pipe.as_boundary().is_none());
        assert!(pipe.as_boundary_mut().is_none());
        assert_eq!(pipe.name(), "pipe");
    }
}
