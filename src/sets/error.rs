use thiserror::Error;

/// Errors raised by illegal set operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// The universe set cannot be enumerated or subtracted from.
    #[error("cannot {0} the universe set")]
    UnboundedOperation(&'static str),

    /// Discrete and continuous operands were mixed.
    #[error("cannot mix discrete and continuous domains")]
    KindMismatch,

    /// The set is not a union of points and cannot be enumerated.
    #[error("set is not discrete and cannot be enumerated")]
    NotDiscrete,

    /// Two patches cover different coordinates.
    #[error("patches cover different coordinates")]
    IncompatiblePatches,
}
