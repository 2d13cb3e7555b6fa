//! Fluid state definitions.

use pf_core::units::constants::g0;
use pf_core::units::{Density, DynVisc, Length, Pressure, Velocity, kg_m3, m, mps, pa, pa_s};

/// Physical state of the fluid at one network vertex.
///
/// Plain value type: copying a state yields an independent state. The
/// primitives are not validated, so a negative density or viscosity is
/// accepted and flows into the derived terms as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidState {
    density: Density,
    dynamic_viscosity: DynVisc,
    height: Length,
    speed: Velocity,
    static_pressure: Pressure,
}

impl Default for FluidState {
    fn default() -> Self {
        Self::water()
    }
}

impl FluidState {
    /// Create a state from its five primitives.
    pub fn new(
        density: Density,
        dynamic_viscosity: DynVisc,
        height: Length,
        speed: Velocity,
        static_pressure: Pressure,
    ) -> Self {
        Self {
            density,
            dynamic_viscosity,
            height,
            speed,
            static_pressure,
        }
    }

    /// Water at rest at datum height and 1 bar.
    ///
    /// 1000 kg/m³, 1.15e-3 Pa·s.
    pub fn water() -> Self {
        Self::new(kg_m3(1000.0), pa_s(1.15e-3), m(0.0), mps(0.0), pa(1.0e5))
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn dynamic_viscosity(&self) -> DynVisc {
        self.dynamic_viscosity
    }

    pub fn height(&self) -> Length {
        self.height
    }

    pub fn speed(&self) -> Velocity {
        self.speed
    }

    pub fn static_pressure(&self) -> Pressure {
        self.static_pressure
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    pub fn set_dynamic_viscosity(&mut self, dynamic_viscosity: DynVisc) {
        self.dynamic_viscosity = dynamic_viscosity;
    }

    pub fn set_height(&mut self, height: Length) {
        self.height = height;
    }

    pub fn set_speed(&mut self, speed: Velocity) {
        self.speed = speed;
    }

    pub fn set_static_pressure(&mut self, static_pressure: Pressure) {
        self.static_pressure = static_pressure;
    }

    /// Builder-style density override.
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Builder-style viscosity override.
    pub fn with_dynamic_viscosity(mut self, dynamic_viscosity: DynVisc) -> Self {
        self.dynamic_viscosity = dynamic_viscosity;
        self
    }

    /// Builder-style height override.
    pub fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Builder-style speed override.
    pub fn with_speed(mut self, speed: Velocity) -> Self {
        self.speed = speed;
        self
    }

    /// Builder-style static pressure override.
    pub fn with_static_pressure(mut self, static_pressure: Pressure) -> Self {
        self.static_pressure = static_pressure;
        self
    }

    /// `½·ρ·|v|·v`: keeps the sign of the speed so reversed flow carries
    /// negative kinetic head.
    pub fn dynamic_pressure(&self) -> Pressure {
        self.density * self.speed.abs() * self.speed * 0.5
    }

    /// `g·h·ρ`.
    pub fn potential_pressure(&self) -> Pressure {
        g0() * self.height * self.density
    }

    /// Total head expressed as pressure: static + dynamic + potential.
    pub fn bernoulli_total(&self) -> Pressure {
        self.static_pressure + self.dynamic_pressure() + self.potential_pressure()
    }
}
