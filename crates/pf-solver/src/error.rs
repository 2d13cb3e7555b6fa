//! Error types for network assembly and solving.

use pf_components::ComponentError;
use pf_core::error::PfError;
use pf_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while building or solving a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    /// The number of unknowns does not match the number of equations, so the
    /// system is not square.
    #[error("System is not square: {unknowns} unknowns vs {equations} equations")]
    UnderdeterminedSystem { unknowns: usize, equations: usize },

    #[error("Solver did not converge after {iterations} iterations (residual = {residual_norm:e})")]
    SolverDidNotConverge {
        iterations: usize,
        residual_norm: f64,
    },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Graph(e) => e.into(),
            SolverError::Component(e) => e.into(),
            SolverError::ProblemSetup { what } => PfError::Invariant { what },
            SolverError::UnderdeterminedSystem { .. } => PfError::Invariant {
                what: e.to_string(),
            },
            SolverError::SolverDidNotConverge { .. } => PfError::Invariant {
                what: e.to_string(),
            },
            SolverError::Numeric { what } => PfError::Invariant { what },
        }
    }
}
