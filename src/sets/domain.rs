//! The domain sum type over the two set kinds.

use std::fmt::Display;

use super::discrete_set::DiscreteSet;
use super::error::SetError;
use super::interval_set::IntervalSet;
use super::value::Value;

/// Whether a domain (and hence a variable) is discrete or continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Discrete,
    Continuous,
}

/// A variable's set of admissible values.
///
/// The kind is fixed at creation and never changes; operations mixing
/// the two kinds are [`SetError::KindMismatch`] errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    Discrete(DiscreteSet),
    Continuous(IntervalSet),
}

impl Domain {
    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Discrete(_) => DomainKind::Discrete,
            Domain::Continuous(_) => DomainKind::Continuous,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Domain::Discrete(set) => set.is_empty(),
            Domain::Continuous(set) => set.is_empty(),
        }
    }

    /// Returns true if the domain can be enumerated: a finite discrete
    /// set, or a continuous set that is a union of single points.
    pub fn is_discrete(&self) -> bool {
        match self {
            Domain::Discrete(set) => set.is_discrete(),
            Domain::Continuous(set) => set.is_discrete(),
        }
    }

    /// Returns true if `value` lies in the domain.
    ///
    /// Continuous domains contain a value iff it is numeric and its real
    /// content lies in the interval set.
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Domain::Discrete(set) => set.contains(value),
            Domain::Continuous(set) => value.as_f64().is_some_and(|x| set.contains(x)),
        }
    }

    /// Returns the intersection of two domains of the same kind.
    pub fn intersection(&self, other: &Domain) -> Result<Domain, SetError> {
        match (self, other) {
            (Domain::Discrete(a), Domain::Discrete(b)) => {
                Ok(Domain::Discrete(a.intersection(b)))
            }
            (Domain::Continuous(a), Domain::Continuous(b)) => {
                Ok(Domain::Continuous(a.intersection(b)))
            }
            _ => Err(SetError::KindMismatch),
        }
    }

    /// Returns `self` with `other` removed, for domains of the same kind.
    pub fn difference(&self, other: &Domain) -> Result<Domain, SetError> {
        match (self, other) {
            (Domain::Discrete(a), Domain::Discrete(b)) => {
                Ok(Domain::Discrete(a.difference(b)?))
            }
            (Domain::Continuous(a), Domain::Continuous(b)) => {
                Ok(Domain::Continuous(a.difference(b)))
            }
            _ => Err(SetError::KindMismatch),
        }
    }

    /// Collects the members of an enumerable domain, in iteration order.
    pub fn members(&self) -> Result<Vec<Value>, SetError> {
        match self {
            Domain::Discrete(set) => Ok(set.members()?.cloned().collect()),
            Domain::Continuous(set) => Ok(set.members()?.map(Value::from).collect()),
        }
    }
}

impl From<DiscreteSet> for Domain {
    fn from(set: DiscreteSet) -> Self {
        Domain::Discrete(set)
    }
}

impl From<IntervalSet> for Domain {
    fn from(set: IntervalSet) -> Self {
        Domain::Continuous(set)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Discrete(set) => set.fmt(f),
            Domain::Continuous(set) => set.fmt(f),
        }
    }
}
