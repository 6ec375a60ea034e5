//! consat - constraint satisfaction over discrete and continuous domains.
//!
//! A constraint satisfaction problem is declared in three steps: build
//! [`Variable`]s with explicit domains, relate them with [`Constraint`]s,
//! and bundle both into a [`Space`]. The solver layer then tightens the
//! space's domains with arc consistency ([`solver::ac3`]) and lazily
//! enumerates every satisfying labeling ([`solver::solve`]).

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod constraints;
pub mod sets;
pub mod solver;
pub mod space;
pub mod variables;

pub use constraints::Constraint;
pub use sets::{DiscreteSet, Domain, Interval, IntervalSet, Value};
pub use solver::{ac3, solve, Method};
pub use space::Space;
pub use variables::Variable;

/// Variable names used by labelings, spaces, and constraints.
pub type Name = String;

/// An assignment of values to variables by name.
///
/// A labeling is *partial* while some variables of a space are unbound
/// and *complete* once all of them are.
pub type Labeling = std::collections::BTreeMap<Name, Value>;
