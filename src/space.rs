//! The working context of a constraint problem.

use std::fmt::Display;

use indexmap::IndexMap;

use crate::constraints::Constraint;
use crate::sets::Domain;
use crate::variables::Variable;
use crate::{Labeling, Name};

/// Variables, their current domains, and the constraints relating them.
///
/// A space snapshots each variable's initial domain at construction.
/// Reduction mutates the snapshot — domains only ever shrink — while the
/// variables and constraints stay immutable and freely shared. Variables
/// keep their insertion order, which is the default search ordering.
#[derive(Debug, Clone)]
pub struct Space {
    variables: IndexMap<Name, Variable>,
    domains: IndexMap<Name, Domain>,
    constraints: Vec<Constraint>,
}

impl Space {
    pub fn new(
        variables: impl IntoIterator<Item = Variable>,
        constraints: Vec<Constraint>,
    ) -> Self {
        let mut vars = IndexMap::new();
        let mut domains = IndexMap::new();
        for variable in variables {
            domains.insert(variable.name().to_owned(), variable.domain().clone());
            vars.insert(variable.name().to_owned(), variable);
        }
        Self {
            variables: vars,
            domains,
            constraints,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Variable names in insertion order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.keys().map(Name::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The current (possibly reduced) domain of `name`.
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    /// Current domains, in variable insertion order.
    pub fn domains(&self) -> impl Iterator<Item = (&str, &Domain)> + '_ {
        self.domains.iter().map(|(name, domain)| (name.as_str(), domain))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns true if every current domain is enumerable.
    pub fn is_discrete(&self) -> bool {
        self.domains.values().all(Domain::is_discrete)
    }

    /// Returns true if the labeling is consistent with every constraint.
    pub fn consistent(&self, lab: &Labeling) -> bool {
        self.constraints.iter().all(|c| c.consistent(lab))
    }

    /// Returns true if the labeling satisfies every constraint.
    pub fn satisfied(&self, lab: &Labeling) -> bool {
        self.constraints.iter().all(|c| c.satisfied(lab))
    }

    /// Split borrow for the reducers: mutable domains alongside the
    /// immutable constraint list.
    pub(crate) fn reduction_parts(&mut self) -> (&mut IndexMap<Name, Domain>, &[Constraint]) {
        (&mut self.domains, &self.constraints)
    }

    /// A fresh space over the same variables with `pin` appended to the
    /// constraints. Domains reset to the variables' initial domains; the
    /// lookahead search re-derives reductions by propagation.
    pub(crate) fn child_with(&self, pin: Constraint) -> Space {
        let mut constraints = self.constraints.clone();
        constraints.push(pin);
        Space::new(self.variables.values().cloned(), constraints)
    }
}

impl Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Space {{")?;
        for (name, domain) in &self.domains {
            writeln!(f, "  {} ∈ {}", name, domain)?;
        }
        for constraint in &self.constraints {
            writeln!(f, "  {}", constraint)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::{DiscreteSet, Interval, IntervalSet, Value};

    fn lab<const N: usize>(pairs: [(&str, Value); N]) -> Labeling {
        pairs.into_iter().map(|(n, v)| (n.to_owned(), v)).collect()
    }

    fn xz_space() -> Space {
        let x = Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]));
        let z = Variable::discrete("z", DiscreteSet::new([1, 2, 3, 5]));
        let eq = Constraint::equal(&x, &z).unwrap();
        Space::new([x, z], vec![eq])
    }

    #[test]
    fn snapshots_initial_domains() {
        let space = xz_space();
        assert_eq!(space.len(), 2);
        assert_eq!(
            space.domain("x"),
            Some(&Domain::Discrete(DiscreteSet::new([1, 2, 3, 5])))
        );
    }

    #[test]
    fn variable_order_is_insertion_order() {
        let space = xz_space();
        let names: Vec<_> = space.variable_names().collect();
        assert_eq!(names, vec!["x", "z"]);
    }

    #[test]
    fn discreteness_follows_current_domains() {
        assert!(xz_space().is_discrete());

        let y = Variable::continuous("y", IntervalSet::from(Interval::open(0.0, 1.0)));
        let space = Space::new([y], Vec::new());
        assert!(!space.is_discrete());

        let p = Variable::continuous("p", IntervalSet::from_points([0.5]));
        let space = Space::new([p], Vec::new());
        assert!(space.is_discrete());
    }

    #[test]
    fn consistency_and_satisfaction_are_conjunctions() {
        let space = xz_space();
        assert!(space.consistent(&lab([])));
        assert!(space.consistent(&lab([("x", 2.into())])));
        assert!(!space.consistent(&lab([("x", 2.into()), ("z", 3.into())])));
        assert!(space.satisfied(&lab([("x", 2.into()), ("z", 2.into())])));
        assert!(!space.satisfied(&lab([("x", 2.into())])));
    }

    #[test]
    fn child_space_resets_domains_and_appends_the_pin() {
        let mut space = xz_space();
        // shrink x by hand, as a reducer would
        let (domains, _) = space.reduction_parts();
        domains["x"] = Domain::Discrete(DiscreteSet::new([1]));

        let x = space.variable("x").unwrap().clone();
        let child = space.child_with(Constraint::fixed_value_unchecked(&x, 5.into()));
        assert_eq!(child.constraints().len(), space.constraints().len() + 1);
        assert_eq!(
            child.domain("x"),
            Some(&Domain::Discrete(DiscreteSet::new([1, 2, 3, 5])))
        );
    }
}
