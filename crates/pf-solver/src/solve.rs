//! High-level solver interface.

use crate::dogleg::{SolverConfig, dogleg_solve};
use crate::error::{SolverError, SolverResult};
use crate::network::Network;
use tracing::{debug, info, warn};

/// Outcome of a converged solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Euclidean norm of the final residual vector
    pub residual_norm: f64,
    /// Number of trust-region iterations
    pub iterations: usize,
    /// Number of unknowns solved for
    pub unknowns: usize,
}

/// Solve a network for its unknown speeds, pressures and boundary flows.
///
/// This function:
/// 1. Initializes the network if needed (boundary closure)
/// 2. Checks the system is square
/// 3. Builds the starting vector per `config.guess`
/// 4. Runs the dogleg root finder, writing every candidate into the network
///    through the unknown schema before evaluating the residual
///
/// Once the solver has run, the network holds the last accepted point,
/// converged or not. If a residual evaluation fails mid-solve the network is
/// reset to the starting vector before the error is returned.
pub fn solve(network: &mut Network, config: &SolverConfig) -> SolverResult<SolveReport> {
    network.initialize()?;

    let unknowns = network.unknown_count();
    let equations = network.equation_count();
    if unknowns != equations {
        return Err(SolverError::UnderdeterminedSystem {
            unknowns,
            equations,
        });
    }

    let schema = network.schema();
    let x0 = network.initial_guess_with(config.guess)?;
    debug!(unknowns, guess = ?config.guess, "starting solve");

    let result = match dogleg_solve(
        x0.clone(),
        |x| {
            schema.write(network, x)?;
            network.residual_vector()
        },
        config,
    ) {
        Ok(result) => result,
        Err(e) => {
            schema.write(network, &x0)?;
            return Err(e);
        }
    };

    schema.write(network, &result.x)?;

    if result.converged {
        info!(
            iterations = result.iterations,
            residual = result.residual_norm,
            "solve converged"
        );
        Ok(SolveReport {
            residual_norm: result.residual_norm,
            iterations: result.iterations,
            unknowns,
        })
    } else {
        warn!(
            iterations = result.iterations,
            residual = result.residual_norm,
            "solve did not converge"
        );
        Err(SolverError::SolverDidNotConverge {
            iterations: result.iterations,
            residual_norm: result.residual_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_components::{ComponentError, ComponentResult, EdgeStates, FrictionEdge, NetworkEdge};
    use pf_core::VertexId;
    use pf_core::units::{Area, Pressure, bar, m, m2, mps, pa};
    use pf_fluids::FluidState;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn vid(i: u32) -> VertexId {
        VertexId::from_index(i)
    }

    #[test]
    fn rejects_non_square_system() {
        let mut net = Network::new(FluidState::water(), 2);
        net.add_edge(FrictionEdge::new("p", m(0.2), m(10.0), m(46.0e-6)), vid(0), vid(1))
            .unwrap();

        let err = solve(&mut net, &SolverConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SolverError::UnderdeterminedSystem {
                unknowns: 6,
                equations: 3
            }
        );
        assert!(net.is_initialized());
    }

    /// Evaluates once, then refuses every later call.
    #[derive(Debug, Default)]
    struct OneShot {
        calls: AtomicUsize,
    }

    impl NetworkEdge for OneShot {
        fn name(&self) -> &str {
            "one-shot"
        }

        fn cross_section(&self) -> Area {
            m2(0.03)
        }

        fn delta_pressure(&self, _states: EdgeStates<'_>) -> ComponentResult<Pressure> {
            if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
                Ok(pa(100.0))
            } else {
                Err(ComponentError::NotSupported { what: "second evaluation" })
            }
        }
    }

    #[test]
    fn failed_evaluation_restores_starting_point() {
        let mut net = Network::new(FluidState::water(), 2);
        net.add_edge(OneShot::default(), vid(0), vid(1)).unwrap();
        net.mark_known_speed(vid(0), mps(2.0)).unwrap();
        net.mark_known_pressure(vid(0), bar(2.0)).unwrap();
        net.mark_known_pressure(vid(1), bar(1.983)).unwrap();
        net.initialize().unwrap();
        let x0 = net.initial_guess();

        let err = solve(&mut net, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::Component(_)), "{err:?}");

        // every unknown is back at its starting value, none left perturbed
        assert_eq!(net.schema().read(&net).unwrap(), x0);
    }

    #[test]
    fn two_node_pipe_converges() {
        let mut net = Network::new(FluidState::water(), 2);
        let pipe = FrictionEdge::new("p", m(0.2), m(10.0), m(46.0e-6));
        net.add_edge(pipe, vid(0), vid(1)).unwrap();
        net.mark_known_speed(vid(0), mps(2.0)).unwrap();
        net.mark_known_pressure(vid(0), bar(2.0)).unwrap();
        net.mark_known_pressure(vid(1), bar(1.983)).unwrap();

        // three unknowns against three equations
        let report = solve(&mut net, &SolverConfig::default()).unwrap();
        assert_eq!(report.unknowns, 3);
        assert!(report.residual_norm <= 1e-6);
    }
}
