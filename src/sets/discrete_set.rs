//! Finite sets of hashable values, plus a symbolic universe.

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

use super::error::SetError;
use super::value::Value;

/// A set of discrete values, or the symbolic set of *all* values.
///
/// The universe is a flag, not data: it short-circuits the binary
/// operations (`everything ∩ X = X`, `everything ∪ X = everything`)
/// without ever being enumerated. It is never iterable and never a
/// difference's minuend.
///
/// Finite members iterate in `Value` order, which is stable and
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscreteSet {
    /// All values of the value universe.
    Universe,
    /// An explicit, finite set of values.
    Finite(BTreeSet<Value>),
}

impl DiscreteSet {
    /// Creates a finite set from anything convertible to values.
    pub fn new<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        DiscreteSet::Finite(elements.into_iter().map(Into::into).collect())
    }

    /// The symbolic set of everything.
    pub fn everything() -> Self {
        DiscreteSet::Universe
    }

    pub fn is_universe(&self) -> bool {
        matches!(self, DiscreteSet::Universe)
    }

    /// The universe is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            DiscreteSet::Universe => false,
            DiscreteSet::Finite(elements) => elements.is_empty(),
        }
    }

    /// Returns true if the set can be enumerated.
    pub fn is_discrete(&self) -> bool {
        !self.is_universe()
    }

    /// Number of elements of a finite set.
    pub fn len(&self) -> Option<usize> {
        match self {
            DiscreteSet::Universe => None,
            DiscreteSet::Finite(elements) => Some(elements.len()),
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match self {
            DiscreteSet::Universe => true,
            DiscreteSet::Finite(elements) => elements.contains(value),
        }
    }

    /// Returns the intersection. The universe is the identity element.
    pub fn intersection(&self, other: &DiscreteSet) -> DiscreteSet {
        match (self, other) {
            (DiscreteSet::Universe, _) => other.clone(),
            (_, DiscreteSet::Universe) => self.clone(),
            (DiscreteSet::Finite(a), DiscreteSet::Finite(b)) => {
                DiscreteSet::Finite(a.intersection(b).cloned().collect())
            }
        }
    }

    /// Returns `self` with `other` removed.
    ///
    /// The universe has no representable complement, so subtracting
    /// *from* it is [`SetError::UnboundedOperation`]; subtracting the
    /// universe from a finite set leaves nothing.
    pub fn difference(&self, other: &DiscreteSet) -> Result<DiscreteSet, SetError> {
        match (self, other) {
            (DiscreteSet::Universe, _) => Err(SetError::UnboundedOperation("subtract from")),
            (_, DiscreteSet::Universe) => Ok(DiscreteSet::Finite(BTreeSet::new())),
            (DiscreteSet::Finite(a), DiscreteSet::Finite(b)) => {
                Ok(DiscreteSet::Finite(a.difference(b).cloned().collect()))
            }
        }
    }

    /// Returns the union. The universe absorbs everything.
    pub fn union(&self, other: &DiscreteSet) -> DiscreteSet {
        match (self, other) {
            (DiscreteSet::Universe, _) | (_, DiscreteSet::Universe) => DiscreteSet::Universe,
            (DiscreteSet::Finite(a), DiscreteSet::Finite(b)) => {
                DiscreteSet::Finite(a.union(b).cloned().collect())
            }
        }
    }

    /// Iterates the members of a finite set in `Value` order.
    pub fn members(&self) -> Result<impl Iterator<Item = &Value> + '_, SetError> {
        match self {
            DiscreteSet::Universe => Err(SetError::UnboundedOperation("iterate")),
            DiscreteSet::Finite(elements) => Ok(elements.iter()),
        }
    }
}

impl Display for DiscreteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscreteSet::Universe => write!(f, "<everything>"),
            DiscreteSet::Finite(elements) if elements.is_empty() => write!(f, "∅"),
            DiscreteSet::Finite(elements) => write!(f, "{{{}}}", elements.iter().join(", ")),
        }
    }
}
