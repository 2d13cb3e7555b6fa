//! Explicit layout of the flat unknown vector.
//!
//! The same schema seeds the initial guess, reads the current state for a
//! warm start and writes solver iterates back into the network, so the three
//! always agree on which slot is which.

use crate::error::{SolverError, SolverResult};
use crate::network::Network;
use nalgebra::DVector;
use pf_core::interior_spread;
use pf_core::units::{m3ps, mps, pa};
use pf_core::{EdgeId, VertexId};

/// Seed range for unknown speeds, m/s.
pub const SPEED_GUESS_RANGE: (f64, f64) = (0.0, 10.0);
/// Seed range for unknown static pressures, Pa.
pub const PRESSURE_GUESS_RANGE: (f64, f64) = (1.0e5, 10.0e5);
/// Seed range for unknown boundary flows, m³/s.
pub const FLOW_GUESS_RANGE: (f64, f64) = (1.0, 100.0);

/// One scalar unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Speed(VertexId),
    Pressure(VertexId),
    BoundaryFlow(EdgeId),
}

/// Ordered slots: unknown speeds, then unknown pressures, then unknown
/// boundary flows, each in classification order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSchema {
    slots: Vec<Slot>,
    speeds: usize,
    pressures: usize,
}

impl UnknownSchema {
    pub fn from_network(network: &Network) -> Self {
        let speeds = network.unknown_speeds();
        let pressures = network.unknown_pressures();
        let flows = network.unknown_boundary_flows();

        let slots = speeds
            .iter()
            .map(|&v| Slot::Speed(v))
            .chain(pressures.iter().map(|&v| Slot::Pressure(v)))
            .chain(flows.iter().map(|&e| Slot::BoundaryFlow(e)))
            .collect();

        Self {
            slots,
            speeds: speeds.len(),
            pressures: pressures.len(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Deterministic seed, independent of the topology.
    ///
    /// Each category spreads its slots evenly strictly inside its range, so
    /// no unknown speed starts at zero.
    pub fn fixed_range_guess(&self) -> DVector<f64> {
        let flows = self.len() - self.speeds - self.pressures;
        let mut x = interior_spread(SPEED_GUESS_RANGE.0, SPEED_GUESS_RANGE.1, self.speeds);
        x.extend(interior_spread(
            PRESSURE_GUESS_RANGE.0,
            PRESSURE_GUESS_RANGE.1,
            self.pressures,
        ));
        x.extend(interior_spread(FLOW_GUESS_RANGE.0, FLOW_GUESS_RANGE.1, flows));
        DVector::from_vec(x)
    }

    /// Current values of every slot, in SI base units.
    pub fn read(&self, network: &Network) -> SolverResult<DVector<f64>> {
        let mut x = DVector::zeros(self.len());
        for (i, slot) in self.slots.iter().enumerate() {
            x[i] = match *slot {
                Slot::Speed(v) => network.state(v)?.speed().value,
                Slot::Pressure(v) => network.state(v)?.static_pressure().value,
                Slot::BoundaryFlow(e) => {
                    let (edge, states) = network.edge_with_states(e)?;
                    edge.volumetric_flow(states).value
                }
            };
        }
        Ok(x)
    }

    /// Store `x` into the network, slot by slot.
    pub fn write(&self, network: &mut Network, x: &DVector<f64>) -> SolverResult<()> {
        if x.len() != self.len() {
            return Err(SolverError::Numeric {
                what: format!(
                    "unknown vector has {} entries, schema has {}",
                    x.len(),
                    self.len()
                ),
            });
        }
        for (slot, &value) in self.slots.iter().zip(x.iter()) {
            match *slot {
                Slot::Speed(v) => network.state_mut(v)?.set_speed(mps(value)),
                Slot::Pressure(v) => network.state_mut(v)?.set_static_pressure(pa(value)),
                Slot::BoundaryFlow(e) => network.boundary_edge_mut(e)?.set_flow(m3ps(value)),
            }
        }
        Ok(())
    }
}

/// Where the solver's starting point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessStrategy {
    /// Fixed per-category ranges; see [`UnknownSchema::fixed_range_guess`].
    #[default]
    FixedRange,
    /// Whatever values the network currently holds, e.g. a previous solution.
    CurrentState,
}

impl Network {
    /// The unknown-vector layout for the current classification.
    pub fn schema(&self) -> UnknownSchema {
        UnknownSchema::from_network(self)
    }

    /// Fixed-range starting vector, one slot per unknown.
    pub fn initial_guess(&self) -> DVector<f64> {
        self.schema().fixed_range_guess()
    }

    pub fn initial_guess_with(&self, strategy: GuessStrategy) -> SolverResult<DVector<f64>> {
        let schema = self.schema();
        match strategy {
            GuessStrategy::FixedRange => Ok(schema.fixed_range_guess()),
            GuessStrategy::CurrentState => schema.read(self),
        }
    }
}
