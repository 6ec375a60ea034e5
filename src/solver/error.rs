use thiserror::Error;

/// Errors raised when configuring a solver run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Search needs every current domain to be enumerable.
    #[error("cannot search a space with non-discrete domains")]
    NotDiscrete,

    /// The method name did not match any known solution method.
    #[error("unknown solution method: {0}")]
    UnknownMethod(String),

    /// A caller-supplied ordering must list every variable of the space
    /// exactly once.
    #[error("ordering must list every variable of the space exactly once")]
    InvalidOrdering,
}
