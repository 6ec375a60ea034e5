use thiserror::Error;

use crate::sets::{SetError, Value};
use crate::Name;

/// Errors raised while constructing constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    /// The value handed to a constructor lies outside the variable's
    /// declared domain.
    #[error("value {value} is incompatible with the domain of {variable}")]
    DomainMismatch { variable: Name, value: Value },

    /// An underlying set operation was illegal (typically mixing
    /// discrete and continuous domains).
    #[error(transparent)]
    Set(#[from] SetError),
}
