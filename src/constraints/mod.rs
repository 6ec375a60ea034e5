//! Constraints relating variables, and the contracts they evaluate.

pub mod constraint;
pub mod error;
pub mod relation;

pub use constraint::Constraint;
pub use error::ConstraintError;
pub use relation::Relation;
