//! Steady-state solver for incompressible pipe networks.
//!
//! A [`Network`] holds one [`FluidState`](pf_fluids::FluidState) per vertex
//! and a [`NetworkEdge`](pf_components::NetworkEdge) per edge. Speeds, static
//! pressures and boundary volumetric flows are classified as known or
//! unknown; [`Network::initialize`] closes the network at its inlets and
//! outlets, and [`solve`] drives the residual vector (Bernoulli balances plus
//! mass balances) to zero with a dogleg trust-region method.
//!
//! # Example
//!
//! ```
//! use pf_components::FrictionEdge;
//! use pf_core::VertexId;
//! use pf_core::units::{bar, m, mps};
//! use pf_fluids::FluidState;
//! use pf_solver::{Network, SolverConfig, solve};
//!
//! let mut net = Network::new(FluidState::water(), 2);
//! let (a, b) = (VertexId::from_index(0), VertexId::from_index(1));
//! net.add_edge(FrictionEdge::new("main", m(0.2), m(10.0), m(46e-6)), a, b)?;
//! net.mark_known_speed(a, mps(2.0))?;
//! net.mark_known_pressure(a, bar(2.0))?;
//! net.mark_known_pressure(b, bar(1.983))?;
//!
//! let report = solve(&mut net, &SolverConfig::default())?;
//! assert_eq!(report.unknowns, 3);
//! let v_out = net.state(b)?.speed().value;
//! assert!(v_out > 2.0 && v_out < 2.1);
//! # Ok::<(), pf_solver::SolverError>(())
//! ```

pub mod classify;
pub mod dogleg;
pub mod error;
pub mod jacobian;
pub mod network;
pub mod residual;
pub mod schema;
pub mod solve;

pub use classify::Classification;
pub use dogleg::{SolverConfig, TrustRegionResult, dogleg_solve};
pub use error::{SolverError, SolverResult};
pub use network::{BoundaryBalance, BoundaryLink, Network};
pub use schema::{GuessStrategy, Slot, UnknownSchema};
pub use solve::{SolveReport, solve};
