//! The constraint catalog: predicates over labelings with per-variable
//! node-consistency projections.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use itertools::Itertools;

use super::error::ConstraintError;
use super::relation::Relation;
use crate::sets::{DiscreteSet, Domain, DomainKind, IntervalSet, SetError, Value};
use crate::variables::Variable;
use crate::{Labeling, Name};

/// A declarative restriction on the values a group of variables may take.
///
/// Every constraint carries the names of the variables it references and,
/// for each of them, the largest domain the constraint alone permits
/// (its *projection*), which drives node-consistency reduction. Two
/// predicates implement the evaluation contract:
///
/// - [`satisfied`](Constraint::satisfied): every referenced variable is
///   bound, every bound value lies in its projection, and the relation
///   holds — the labeling definitely obeys the constraint.
/// - [`consistent`](Constraint::consistent): the labeling shows no
///   evidence of violation yet; unbound variables are not evidence.
///
/// Constraints are immutable after construction and cheap to clone.
#[derive(Debug, Clone)]
pub struct Constraint {
    vnames: Vec<Name>,
    projected: HashMap<Name, Domain>,
    kind: Kind,
}

/// The closed set of constraint forms.
#[derive(Debug, Clone)]
enum Kind {
    /// `v = c`
    FixedValue { name: Name, value: Value },
    /// `v ∈ D`, with `D` stored as the projection.
    InDomain,
    /// Pairwise inequality over the referenced variables.
    AllDifferent,
    /// `left ⋈ right` for a comparison `⋈`.
    Relation {
        relation: Relation,
        left: Name,
        right: Name,
    },
    /// `(left, right)` must be one of an explicit set of pairs.
    Table {
        left: Name,
        right: Name,
        pairs: BTreeSet<(Value, Value)>,
    },
}

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl Constraint {
    /// Pins `variable` to `value`.
    ///
    /// Fails with [`ConstraintError::DomainMismatch`] if the value lies
    /// outside the variable's declared domain.
    pub fn fixed_value(
        variable: &Variable,
        value: impl Into<Value>,
    ) -> Result<Self, ConstraintError> {
        let value = value.into();
        if !variable.domain().contains(&value) {
            return Err(ConstraintError::DomainMismatch {
                variable: variable.name().to_owned(),
                value,
            });
        }
        Ok(Self::fixed_value_unchecked(variable, value))
    }

    /// Pins without the domain check. The solver uses this for values
    /// drawn from the variable's own (already reduced) domain.
    pub(crate) fn fixed_value_unchecked(variable: &Variable, value: Value) -> Self {
        let name: Name = variable.name().to_owned();
        let projected = match variable.kind() {
            DomainKind::Discrete => Domain::Discrete(DiscreteSet::new([value.clone()])),
            DomainKind::Continuous => {
                Domain::Continuous(IntervalSet::from_points(value.as_f64()))
            }
        };
        Self {
            vnames: vec![name.clone()],
            projected: HashMap::from([(name.clone(), projected)]),
            kind: Kind::FixedValue { name, value },
        }
    }

    /// Requires `variable` to take a value from `domain`.
    ///
    /// The domain must have the variable's kind.
    pub fn in_domain(variable: &Variable, domain: Domain) -> Result<Self, ConstraintError> {
        if domain.kind() != variable.kind() {
            return Err(SetError::KindMismatch.into());
        }
        let name: Name = variable.name().to_owned();
        Ok(Self {
            vnames: vec![name.clone()],
            projected: HashMap::from([(name, domain)]),
            kind: Kind::InDomain,
        })
    }

    /// Requires all `variables` to take pairwise different values.
    pub fn all_different(variables: &[Variable]) -> Self {
        let vnames: Vec<Name> = variables
            .iter()
            .map(|v| v.name().to_owned())
            .unique()
            .collect();
        let projected = variables
            .iter()
            .map(|v| (v.name().to_owned(), v.domain().clone()))
            .collect();
        Self {
            vnames,
            projected,
            kind: Kind::AllDifferent,
        }
    }

    fn binary(relation: Relation, left: &Variable, right: &Variable) -> Self {
        Self {
            vnames: vec![left.name().to_owned(), right.name().to_owned()],
            projected: HashMap::from([
                (left.name().to_owned(), left.domain().clone()),
                (right.name().to_owned(), right.domain().clone()),
            ]),
            kind: Kind::Relation {
                relation,
                left: left.name().to_owned(),
                right: right.name().to_owned(),
            },
        }
    }

    /// `left = right`.
    ///
    /// Equality is the one relation that says something about the
    /// domains: both variables project to the intersection of the two.
    /// Fails when the variables have different kinds.
    pub fn equal(left: &Variable, right: &Variable) -> Result<Self, ConstraintError> {
        let shared = left.domain().intersection(right.domain())?;
        let mut constraint = Self::binary(Relation::Equal, left, right);
        constraint
            .projected
            .insert(left.name().to_owned(), shared.clone());
        constraint.projected.insert(right.name().to_owned(), shared);
        Ok(constraint)
    }

    /// `left ≠ right`.
    pub fn not_equal(left: &Variable, right: &Variable) -> Self {
        Self::binary(Relation::NotEqual, left, right)
    }

    /// `left < right`.
    pub fn less(left: &Variable, right: &Variable) -> Self {
        Self::binary(Relation::Less, left, right)
    }

    /// `left ≤ right`.
    pub fn less_equal(left: &Variable, right: &Variable) -> Self {
        Self::binary(Relation::LessEqual, left, right)
    }

    /// `left > right`.
    pub fn greater(left: &Variable, right: &Variable) -> Self {
        Self::binary(Relation::Greater, left, right)
    }

    /// `left ≥ right`.
    pub fn greater_equal(left: &Variable, right: &Variable) -> Self {
        Self::binary(Relation::GreaterEqual, left, right)
    }

    /// Restricts `(left, right)` to an explicit set of allowed pairs.
    ///
    /// Each variable projects to the values the pairs permit for its
    /// coordinate. Both variables must be discrete.
    pub fn table<I, A, B>(
        left: &Variable,
        right: &Variable,
        pairs: I,
    ) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<Value>,
        B: Into<Value>,
    {
        if left.kind() != DomainKind::Discrete || right.kind() != DomainKind::Discrete {
            return Err(SetError::KindMismatch.into());
        }
        let pairs: BTreeSet<(Value, Value)> = pairs
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect();
        let firsts = DiscreteSet::new(pairs.iter().map(|(a, _)| a.clone()));
        let seconds = DiscreteSet::new(pairs.iter().map(|(_, b)| b.clone()));
        Ok(Self {
            vnames: vec![left.name().to_owned(), right.name().to_owned()],
            projected: HashMap::from([
                (left.name().to_owned(), Domain::Discrete(firsts)),
                (right.name().to_owned(), Domain::Discrete(seconds)),
            ]),
            kind: Kind::Table {
                left: left.name().to_owned(),
                right: right.name().to_owned(),
                pairs,
            },
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Accessors
// ─────────────────────────────────────────────────────────────────────

impl Constraint {
    /// Names of the variables this constraint references.
    pub fn vnames(&self) -> &[Name] {
        &self.vnames
    }

    /// Returns true if the constraint references `name`.
    pub fn references(&self, name: &str) -> bool {
        self.vnames.iter().any(|n| n == name)
    }

    /// The largest domain this constraint alone permits for `name`.
    pub fn projected(&self, name: &str) -> Option<&Domain> {
        self.projected.get(name)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────

impl Constraint {
    /// Returns whether a labeling definitely obeys this constraint.
    pub fn satisfied(&self, lab: &Labeling) -> bool {
        match &self.kind {
            Kind::FixedValue { name, value } => {
                lab.get(name).is_some_and(|v| v.coincides(value))
            }
            Kind::InDomain => self
                .vnames
                .iter()
                .all(|name| self.bound_in_projection(lab, name)),
            Kind::AllDifferent => {
                self.vnames.iter().all(|name| lab.contains_key(name))
                    && self.pairwise_different(lab)
            }
            Kind::Relation {
                relation,
                left,
                right,
            } => {
                if !self
                    .vnames
                    .iter()
                    .all(|name| self.bound_in_projection(lab, name))
                {
                    return false;
                }
                match (lab.get(left), lab.get(right)) {
                    (Some(l), Some(r)) => relation.holds(l, r),
                    _ => false,
                }
            }
            Kind::Table { left, right, pairs } => match (lab.get(left), lab.get(right)) {
                (Some(l), Some(r)) => pairs.contains(&(l.clone(), r.clone())),
                _ => false,
            },
        }
    }

    /// Returns whether a (possibly partial) labeling shows no evidence
    /// of violating this constraint.
    pub fn consistent(&self, lab: &Labeling) -> bool {
        match &self.kind {
            Kind::FixedValue { name, .. } => {
                if lab.contains_key(name) {
                    self.satisfied(lab)
                } else {
                    true
                }
            }
            Kind::InDomain => self.vnames.iter().all(|name| match lab.get(name) {
                Some(_) => self.bound_in_projection(lab, name),
                None => true,
            }),
            Kind::AllDifferent => self.pairwise_different(lab),
            Kind::Relation {
                relation,
                left,
                right,
            } => {
                let mut incomplete = false;
                for name in &self.vnames {
                    if !lab.contains_key(name) {
                        incomplete = true;
                    } else if !self.bound_in_projection(lab, name) {
                        return false;
                    }
                }
                if incomplete {
                    return true;
                }
                match (lab.get(left), lab.get(right)) {
                    (Some(l), Some(r)) => relation.holds(l, r),
                    _ => false,
                }
            }
            Kind::Table { left, right, pairs } => {
                let mut incomplete = false;
                for name in &self.vnames {
                    if !lab.contains_key(name) {
                        incomplete = true;
                    } else if !self.bound_in_projection(lab, name) {
                        return false;
                    }
                }
                if incomplete {
                    return true;
                }
                match (lab.get(left), lab.get(right)) {
                    (Some(l), Some(r)) => pairs.contains(&(l.clone(), r.clone())),
                    _ => false,
                }
            }
        }
    }

    fn bound_in_projection(&self, lab: &Labeling, name: &Name) -> bool {
        match (lab.get(name), self.projected.get(name)) {
            (Some(value), Some(domain)) => domain.contains(value),
            _ => false,
        }
    }

    fn pairwise_different(&self, lab: &Labeling) -> bool {
        self.vnames
            .iter()
            .tuple_combinations()
            .all(|(a, b)| match (lab.get(a), lab.get(b)) {
                (Some(va), Some(vb)) => !va.coincides(vb),
                _ => true,
            })
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            Kind::FixedValue { name, value } => write!(f, "{} = {}", name, value),
            Kind::InDomain => {
                let name = &self.vnames[0];
                match self.projected.get(name) {
                    Some(domain) => write!(f, "{} ∈ {}", name, domain),
                    None => write!(f, "{} ∈ ∅", name),
                }
            }
            Kind::AllDifferent => write!(f, "AllDifferent({})", self.vnames.iter().join(", ")),
            Kind::Relation {
                relation,
                left,
                right,
            } => write!(f, "{} {} {}", left, relation, right),
            Kind::Table { left, right, pairs } => write!(
                f,
                "({}, {}) ∈ {{{}}}",
                left,
                right,
                pairs
                    .iter()
                    .map(|(a, b)| format!("({}, {})", a, b))
                    .join(", ")
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::Interval;

    fn lab<const N: usize>(pairs: [(&str, Value); N]) -> Labeling {
        pairs.into_iter().map(|(n, v)| (n.to_owned(), v)).collect()
    }

    fn x() -> Variable {
        Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]))
    }

    fn y_real() -> Variable {
        Variable::continuous("y", IntervalSet::from(Interval::open(1.0, 2.0)))
    }

    #[test]
    fn fixed_value_rejects_values_outside_the_domain() {
        assert!(matches!(
            Constraint::fixed_value(&x(), 8),
            Err(ConstraintError::DomainMismatch { .. })
        ));
        assert!(matches!(
            Constraint::fixed_value(&y_real(), 2.0),
            Err(ConstraintError::DomainMismatch { .. })
        ));
    }

    #[test]
    fn fixed_value_satisfied() {
        let cx = Constraint::fixed_value(&x(), 1).unwrap();
        assert!(cx.satisfied(&lab([("d", 2.into()), ("x", 1.into())])));
        assert!(!cx.satisfied(&lab([("d", 2.into()), ("x", 2.into())])));

        let cy = Constraint::fixed_value(&y_real(), 1.4).unwrap();
        assert!(cy.satisfied(&lab([("d", 2.into()), ("y", 1.4.into())])));
        assert!(!cy.satisfied(&lab([("d", 2.into()), ("y", 1.5.into())])));
    }

    #[test]
    fn fixed_value_consistent() {
        let cx = Constraint::fixed_value(&x(), 1).unwrap();
        let cy = Constraint::fixed_value(&y_real(), 1.4).unwrap();

        assert!(cx.consistent(&lab([])));
        assert!(cy.consistent(&lab([])));

        assert!(cx.consistent(&lab([("y", 3.into())])));
        assert!(cy.consistent(&lab([("x", 0.into())])));
        assert!(!cx.consistent(&lab([("x", 3.into())])));
    }

    #[test]
    fn fixed_value_projects_a_singleton() {
        let cx = Constraint::fixed_value(&x(), 1).unwrap();
        assert_eq!(
            cx.projected("x"),
            Some(&Domain::Discrete(DiscreteSet::new([1])))
        );

        let cy = Constraint::fixed_value(&y_real(), 1.4).unwrap();
        assert_eq!(
            cy.projected("y"),
            Some(&Domain::Continuous(IntervalSet::from_points([1.4])))
        );
    }

    #[test]
    fn all_different() {
        let a = Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]));
        let b = Variable::discrete("y", DiscreteSet::new([1, 2, 3, 5]));
        let cnst = Constraint::all_different(&[a, b]);

        assert!(cnst.satisfied(&lab([("x", 2.into()), ("y", 1.into())])));
        assert!(!cnst.satisfied(&lab([("x", 2.into()), ("y", 2.into())])));
        // unbound variables are not evidence
        assert!(!cnst.satisfied(&lab([("x", 2.into())])));

        assert!(cnst.consistent(&lab([])));
        assert!(cnst.consistent(&lab([("x", 2.into())])));
        assert!(cnst.consistent(&lab([("x", 2.into()), ("y", 3.into())])));
        assert!(!cnst.consistent(&lab([("x", 2.into()), ("y", 2.into())])));
    }

    #[test]
    fn in_domain() {
        let cnst =
            Constraint::in_domain(&x(), Domain::Discrete(DiscreteSet::new([1, 3, 7]))).unwrap();

        assert!(cnst.satisfied(&lab([("x", 1.into())])));
        assert!(!cnst.satisfied(&lab([("x", 2.into())])));
        assert!(!cnst.satisfied(&lab([])));

        assert!(cnst.consistent(&lab([])));
        assert!(cnst.consistent(&lab([("x", 1.into())])));
        assert!(!cnst.consistent(&lab([("x", 2.into())])));
    }

    #[test]
    fn in_domain_requires_matching_kind() {
        assert!(matches!(
            Constraint::in_domain(&x(), Domain::Continuous(IntervalSet::everything())),
            Err(ConstraintError::Set(SetError::KindMismatch))
        ));
    }

    #[test]
    fn relations_on_continuous_variables() {
        let a = Variable::continuous("x", IntervalSet::from(Interval::open(0.0, 1.0)));
        let b = Variable::continuous("y", IntervalSet::from(Interval::open(0.0, 1.0)));

        let eq = Constraint::equal(&a, &b).unwrap();
        assert!(eq.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));
        assert!(!eq.satisfied(&lab([("x", 0.4.into()), ("y", 0.5.into())])));
        assert!(eq.consistent(&lab([])));
        assert!(eq.consistent(&lab([("x", 0.5.into())])));

        let ne = Constraint::not_equal(&a, &b);
        assert!(ne.satisfied(&lab([("x", 0.4.into()), ("y", 0.5.into())])));
        assert!(!ne.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));
        assert!(ne.consistent(&lab([("x", 0.5.into())])));

        let lt = Constraint::less(&a, &b);
        assert!(lt.satisfied(&lab([("x", 0.4.into()), ("y", 0.5.into())])));
        assert!(!lt.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));

        let le = Constraint::less_equal(&a, &b);
        assert!(le.satisfied(&lab([("x", 0.4.into()), ("y", 0.5.into())])));
        assert!(le.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));
        assert!(!le.satisfied(&lab([("x", 0.5.into()), ("y", 0.4.into())])));

        let gt = Constraint::greater(&a, &b);
        assert!(gt.satisfied(&lab([("x", 0.5.into()), ("y", 0.4.into())])));
        assert!(!gt.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));

        let ge = Constraint::greater_equal(&a, &b);
        assert!(ge.satisfied(&lab([("x", 0.5.into()), ("y", 0.4.into())])));
        assert!(ge.satisfied(&lab([("x", 0.4.into()), ("y", 0.4.into())])));
        assert!(!ge.satisfied(&lab([("x", 0.4.into()), ("y", 0.5.into())])));
    }

    #[test]
    fn satisfaction_requires_values_inside_the_declared_domains() {
        let a = Variable::discrete("x", DiscreteSet::new([1, 2]));
        let b = Variable::discrete("y", DiscreteSet::new([1, 2]));
        let lt = Constraint::less(&a, &b);
        // 0 < 1 holds, but 0 is outside x's domain
        assert!(!lt.satisfied(&lab([("x", 0.into()), ("y", 1.into())])));
        assert!(!lt.consistent(&lab([("x", 0.into())])));
    }

    #[test]
    fn equal_projects_the_domain_intersection_onto_both() {
        let a = Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]));
        let b = Variable::discrete("x2", DiscreteSet::new([1, 2, 3, 6]));
        let eq = Constraint::equal(&a, &b).unwrap();
        let shared = Domain::Discrete(DiscreteSet::new([1, 2, 3]));
        assert_eq!(eq.projected("x"), Some(&shared));
        assert_eq!(eq.projected("x2"), Some(&shared));
    }

    #[test]
    fn equal_requires_matching_kinds() {
        assert!(matches!(
            Constraint::equal(&x(), &y_real()),
            Err(ConstraintError::Set(SetError::KindMismatch))
        ));
    }

    #[test]
    fn table_relation() {
        let a = Variable::discrete("x", DiscreteSet::new(["a", "b", "c"]));
        let b = Variable::discrete("y", DiscreteSet::new([1, 2, 3]));
        let cnst = Constraint::table(&a, &b, [("a", 1), ("b", 1), ("c", 3)]).unwrap();

        assert!(cnst.satisfied(&lab([("x", "a".into()), ("y", 1.into())])));
        assert!(!cnst.satisfied(&lab([("x", "a".into()), ("y", 2.into())])));

        assert!(cnst.consistent(&lab([])));
        assert!(cnst.consistent(&lab([("y", 1.into())])));
        assert!(!cnst.consistent(&lab([("y", 2.into())])));
    }

    #[test]
    fn table_projects_each_coordinate() {
        let a = Variable::discrete("x", DiscreteSet::new([1, 2, 3, 5]));
        let b = Variable::discrete("y", DiscreteSet::new(["a", "b", "c"]));
        let cnst = Constraint::table(&a, &b, [(1, "a"), (3, "b"), (2, "b")]).unwrap();
        assert_eq!(
            cnst.projected("x"),
            Some(&Domain::Discrete(DiscreteSet::new([1, 2, 3])))
        );
        assert_eq!(
            cnst.projected("y"),
            Some(&Domain::Discrete(DiscreteSet::new(["a", "b"])))
        );
    }

    #[test]
    fn table_requires_discrete_variables() {
        let a = Variable::discrete("x", DiscreteSet::new([1, 2]));
        assert!(matches!(
            Constraint::table(&y_real(), &a, [(1, 1)]),
            Err(ConstraintError::Set(SetError::KindMismatch))
        ));
    }

    #[test]
    fn display() {
        let cnst = Constraint::fixed_value(&x(), 3).unwrap();
        assert_eq!(cnst.to_string(), "x = 3");

        let a = Variable::discrete("x", DiscreteSet::new([1, 2]));
        let b = Variable::discrete("y", DiscreteSet::new([1, 2]));
        assert_eq!(Constraint::less(&a, &b).to_string(), "x < y");
        assert_eq!(
            Constraint::all_different(&[a, b]).to_string(),
            "AllDifferent(x, y)"
        );
    }
}
