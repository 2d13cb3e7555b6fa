//! pf-components: edge library for incompressible pipe networks.
//!
//! Provides:
//! - `FrictionEdge`: a straight pipe with Darcy–Weisbach / Haaland losses
//! - `BoundaryEdge`: a virtual edge closing the network at inlets and outlets
//!
//! Edges implement `NetworkEdge` and are pure functions of their parameters
//! and the two endpoint states lent to them through `EdgeStates`.
//!
//! # Example
//!
//! ```
//! use pf_components::{EdgeStates, FrictionEdge, NetworkEdge};
//! use pf_core::units::{m, mps};
//! use pf_fluids::FluidState;
//!
//! let pipe = FrictionEdge::new("feed", m(0.2), m(20.0), m(4.6e-5));
//! let u = FluidState::water().with_speed(mps(10.0));
//! let v = FluidState::water();
//!
//! let dp = pipe.delta_pressure(EdgeStates::new(&u, &v)).unwrap();
//! assert!(dp.value > 7.0e4 && dp.value < 7.5e4);
//! ```

pub mod boundary;
pub mod common;
pub mod error;
pub mod friction;
pub mod pipe;
pub mod traits;

// Re-exports
pub use boundary::BoundaryEdge;
pub use error::{ComponentError, ComponentResult};
pub use friction::{DARCY_FLOW_COEFFICIENT, darcy_weisbach, haaland, reynolds};
pub use pipe::FrictionEdge;
pub use traits::{EdgeStates, NetworkEdge};
