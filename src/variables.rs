//! Variable declarations for constraint problems.

use std::fmt::Display;

use crate::sets::{DiscreteSet, Domain, DomainKind, IntervalSet};
use crate::Name;

/// An immutable variable handle: a unique name, an optional description,
/// and the initial domain. The kind (discrete or continuous) is fixed by
/// the domain and never changes.
///
/// Variables are cheap to clone and freely shared between constraints
/// and spaces; only a [`Space`](crate::Space)'s domain snapshot ever
/// shrinks during solving.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    name: Name,
    description: Option<String>,
    domain: Domain,
}

impl Variable {
    /// Declares a discrete variable. Pass [`DiscreteSet::everything`]
    /// for an unrestricted one.
    pub fn discrete(name: impl Into<Name>, domain: DiscreteSet) -> Self {
        Self {
            name: name.into(),
            description: None,
            domain: Domain::Discrete(domain),
        }
    }

    /// Declares a continuous variable. Pass [`IntervalSet::everything`]
    /// for the whole real line.
    pub fn continuous(name: impl Into<Name>, domain: IntervalSet) -> Self {
        Self {
            name: name.into(),
            description: None,
            domain: Domain::Continuous(domain),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> DomainKind {
        self.domain.kind()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ∈ {}", self.name, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::{Interval, Value};

    #[test]
    fn discrete_variable() {
        let x = Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]));
        assert_eq!(x.name(), "x");
        assert_eq!(x.kind(), DomainKind::Discrete);
        assert!(x.domain().contains(&Value::from(3)));
        assert!(x.description().is_none());
    }

    #[test]
    fn continuous_variable_with_description() {
        let y = Variable::continuous("y", IntervalSet::from(Interval::open(1.0, 2.0)))
            .with_description("a length");
        assert_eq!(y.kind(), DomainKind::Continuous);
        assert_eq!(y.description(), Some("a length"));
        assert!(y.domain().contains(&Value::from(1.4)));
        assert!(!y.domain().contains(&Value::from(2.0)));
    }

    #[test]
    fn unrestricted_domains() {
        let x = Variable::discrete("x", DiscreteSet::everything());
        assert!(x.domain().contains(&Value::from("anything")));

        let y = Variable::continuous("y", IntervalSet::everything());
        assert!(y.domain().contains(&Value::from(1e300)));
    }
}
