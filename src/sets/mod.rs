//! One-dimensional set algebra and the domain sum type.
//!
//! The engine represents sets of real numbers as canonical unions of
//! disjoint intervals ([`IntervalSet`]) and sets of discrete values as
//! finite collections with a symbolic universe ([`DiscreteSet`]).
//! [`Domain`] is the tagged union over both kinds; [`Patch`] and
//! [`PatchSet`] lift the algebra to multidimensional regions.

pub mod discrete_set;
pub mod domain;
pub mod error;
pub mod interval;
pub mod interval_set;
pub mod patch;
pub mod value;

pub use discrete_set::DiscreteSet;
pub use domain::{Domain, DomainKind};
pub use error::SetError;
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use patch::{Patch, PatchSet};
pub use value::Value;
