//! Error types for edge calculations.

use pf_core::error::PfError;
use thiserror::Error;

/// Errors that can occur while evaluating an edge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// An input lies outside the domain of a physical correlation.
    #[error("Invalid physical input for {what}: {value}")]
    InvalidPhysicalInput { what: &'static str, value: f64 },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for PfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidPhysicalInput { what, .. } => PfError::InvalidArg { what },
            ComponentError::NonPhysical { what } => PfError::InvalidArg { what },
            ComponentError::NotSupported { what } => PfError::InvalidArg { what },
        }
    }
}
