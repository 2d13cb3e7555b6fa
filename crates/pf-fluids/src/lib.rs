//! pf-fluids: fluid state at a network vertex.
//!
//! A `FluidState` holds the five primitive quantities of a single-phase,
//! incompressible fluid (density, dynamic viscosity, height, speed, static
//! pressure). The energy terms used by the Bernoulli balance are derived on
//! every read and never stored.
//!
//! # Example
//!
//! ```
//! use pf_core::units::mps;
//! use pf_fluids::FluidState;
//!
//! let mut water = FluidState::water();
//! water.set_speed(mps(1.0));
//! assert!((water.dynamic_pressure().value - 500.0).abs() < 1e-9);
//! assert!((water.bernoulli_total().value - 100_500.0).abs() < 1e-9);
//! ```

pub mod state;

pub use state::FluidState;
