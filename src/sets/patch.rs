//! Multidimensional regions built from one-dimensional sets.
//!
//! A [`Patch`] is the cartesian product of one domain per named
//! coordinate; a [`PatchSet`] is a union of patches. Together they
//! describe fairly general subsets of a multidimensional value space.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

use super::domain::Domain;
use super::error::SetError;
use crate::{Labeling, Name};

/// A rectangular region: one domain per named coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    sets: BTreeMap<Name, Domain>,
}

impl Patch {
    pub fn new<I, N, D>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<Name>,
        D: Into<Domain>,
    {
        Self {
            sets: coordinates
                .into_iter()
                .map(|(name, domain)| (name.into(), domain.into()))
                .collect(),
        }
    }

    /// The region is empty as soon as any coordinate set is.
    pub fn is_empty(&self) -> bool {
        self.sets.values().any(Domain::is_empty)
    }

    /// Returns true if every coordinate set can be enumerated.
    pub fn is_discrete(&self) -> bool {
        self.sets.values().all(Domain::is_discrete)
    }

    pub fn coordinate(&self, name: &str) -> Option<&Domain> {
        self.sets.get(name)
    }

    /// Intersects two patches over the same coordinates.
    pub fn intersection(&self, other: &Patch) -> Result<Patch, SetError> {
        if !self.sets.keys().eq(other.sets.keys()) {
            return Err(SetError::IncompatiblePatches);
        }
        let mut sets = BTreeMap::new();
        for (name, domain) in &self.sets {
            sets.insert(name.clone(), domain.intersection(&other.sets[name])?);
        }
        Ok(Patch { sets })
    }

    /// Returns true if the point's coordinates all lie in their sets.
    /// Coordinates the patch does not know about disqualify the point.
    pub fn contains(&self, point: &Labeling) -> bool {
        point.iter().all(|(name, value)| {
            self.sets
                .get(name)
                .is_some_and(|domain| domain.contains(value))
        })
    }

    /// Enumerates the points of a discrete patch: the cartesian product
    /// of the coordinate members, coordinates in name order.
    pub fn points(&self) -> Result<impl Iterator<Item = Labeling> + '_, SetError> {
        let names: Vec<&Name> = self.sets.keys().collect();
        let members: Vec<Vec<_>> = self
            .sets
            .values()
            .map(Domain::members)
            .collect::<Result<_, _>>()?;
        Ok(members
            .into_iter()
            .map(Vec::into_iter)
            .multi_cartesian_product()
            .map(move |combination| {
                names
                    .iter()
                    .map(|n| (*n).clone())
                    .zip(combination)
                    .collect()
            }))
    }
}

impl Display for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty patch>");
        }
        write!(
            f,
            "{}",
            self.sets
                .iter()
                .map(|(name, domain)| format!("{}:{}", name, domain))
                .join(" × ")
        )
    }
}

/// A union of patches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    /// Creates a patch set; empty patches are dropped.
    pub fn new(patches: impl IntoIterator<Item = Patch>) -> Self {
        Self {
            patches: patches.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn is_discrete(&self) -> bool {
        self.patches.iter().all(Patch::is_discrete)
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Intersects pairwise and keeps the non-empty results.
    pub fn intersection(&self, other: &PatchSet) -> Result<PatchSet, SetError> {
        let mut patches = Vec::new();
        for p1 in &self.patches {
            for p2 in &other.patches {
                patches.push(p1.intersection(p2)?);
            }
        }
        Ok(PatchSet::new(patches))
    }

    /// Returns true if any patch contains the point.
    pub fn contains(&self, point: &Labeling) -> bool {
        self.patches.iter().any(|p| p.contains(point))
    }

    /// Enumerates the distinct points of a discrete patch set.
    pub fn points(&self) -> Result<impl Iterator<Item = Labeling>, SetError> {
        let mut seen: BTreeSet<Labeling> = BTreeSet::new();
        for patch in &self.patches {
            seen.extend(patch.points()?);
        }
        Ok(seen.into_iter())
    }
}

impl Display for PatchSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty patch set>");
        }
        write!(f, "{{ {} }}", self.patches.iter().join(" ∪ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::{DiscreteSet, Interval, IntervalSet};

    fn lab<const N: usize>(pairs: [(&str, crate::Value); N]) -> Labeling {
        pairs
            .into_iter()
            .map(|(n, v)| (n.to_owned(), v))
            .collect()
    }

    fn mixed_patches() -> (Patch, Patch, Patch, Patch) {
        let ds1 = DiscreteSet::new(["M1", "M2", "M3"]);
        let ds2 = DiscreteSet::new(["M1", "M2", "M4"]);
        let fs1 = DiscreteSet::new(["foo", "bar", "baz"]);
        let is1 = IntervalSet::from(vec![
            Interval::right_open(0.0, 4.0),
            Interval::point(6.0),
        ]);
        let is2 = IntervalSet::from(vec![Interval::open(4.0, 5.0), Interval::point(6.0)]);
        let is3 = IntervalSet::from(Interval::open(3.0, 5.0));

        (
            Patch::new([("thread", Domain::from(ds1)), ("len", Domain::from(is1))]),
            Patch::new([
                ("thread", Domain::from(ds2.clone())),
                ("len", Domain::from(is2)),
            ]),
            Patch::new([
                ("thread", Domain::from(ds2)),
                ("len", Domain::from(is3.clone())),
            ]),
            Patch::new([("thread", Domain::from(fs1)), ("len", Domain::from(is3))]),
        )
    }

    #[test]
    fn a_patch_with_a_continuous_axis_is_not_discrete() {
        let (p1, _, _, _) = mixed_patches();
        assert!(!p1.is_discrete());
        assert!(!p1.is_empty());
    }

    #[test]
    fn intersection_can_become_discrete() {
        let (p1, p2, p3, p4) = mixed_patches();

        // [0,4) ∪ {6} meets (4,5) ∪ {6} only at the point 6
        let p = p1.intersection(&p2).unwrap();
        assert!(p.is_discrete());
        assert!(!p.is_empty());

        let p = p1.intersection(&p3).unwrap();
        assert!(!p.is_discrete());
        assert!(!p.is_empty());

        // disjoint thread names
        let p = p1.intersection(&p4).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn intersection_requires_matching_coordinates() {
        let a = Patch::new([("x", Domain::from(DiscreteSet::new([1])))]);
        let b = Patch::new([("y", Domain::from(DiscreteSet::new([1])))]);
        assert!(matches!(
            a.intersection(&b),
            Err(SetError::IncompatiblePatches)
        ));
    }

    #[test]
    fn membership() {
        let (p1, p2, _, p4) = mixed_patches();

        assert!(p1.contains(&lab([("thread", "M1".into()), ("len", 6.0.into())])));
        assert!(!p1.contains(&lab([("thread", "M1".into()), ("len", 7.0.into())])));
        assert!(!p1.contains(&lab([("thread", "M4".into()), ("len", 6.0.into())])));

        assert!(p2.contains(&lab([("thread", "M1".into()), ("len", 4.5.into())])));
        assert!(!p2.contains(&lab([("thread", "M3".into()), ("len", 6.0.into())])));

        assert!(!p4.contains(&lab([("thread", "M1".into()), ("len", 6.0.into())])));
    }

    #[test]
    fn point_iteration() {
        let (p1, p2, _, _) = mixed_patches();

        let p = p1.intersection(&p2).unwrap();
        assert_eq!(p.points().unwrap().count(), 2);

        assert!(matches!(p1.points(), Err(SetError::NotDiscrete)));
    }

    #[test]
    fn patch_set_point_iteration_deduplicates() {
        let d1 = Patch::new([
            ("x1", Domain::from(DiscreteSet::new(["A", "B", "V"]))),
            ("x2", Domain::from(DiscreteSet::new(["1", "2", "3"]))),
        ]);
        let d2 = Patch::new([
            ("x1", Domain::from(DiscreteSet::new(["C"]))),
            ("x2", Domain::from(DiscreteSet::new(["2", "3"]))),
        ]);
        let set = PatchSet::new([d1.clone(), d2]);
        assert!(set.is_discrete());
        assert_eq!(set.points().unwrap().count(), 11);

        // overlapping patches count shared points once
        let twice = PatchSet::new([d1.clone(), d1]);
        assert_eq!(twice.points().unwrap().count(), 9);
    }

    #[test]
    fn patch_set_intersection() {
        let m1 = Patch::new([
            ("x1", Domain::from(DiscreteSet::new(["A", "B", "V"]))),
            (
                "x2",
                Domain::from(IntervalSet::from(vec![
                    Interval::closed(0.0, 4.0),
                    Interval::left_open(6.0, 8.0),
                ])),
            ),
        ]);
        let m2 = Patch::new([
            ("x1", Domain::from(DiscreteSet::new(["C"]))),
            (
                "x2",
                Domain::from(IntervalSet::from(vec![
                    Interval::closed(1.0, 3.0),
                    Interval::left_open(10.0, 21.0),
                ])),
            ),
        ]);
        let m = PatchSet::new([m1, m2]);
        assert!(!m.is_discrete());
        assert!(!m.is_empty());

        let m_disc = PatchSet::new([Patch::new([
            ("x1", Domain::from(DiscreteSet::everything())),
            ("x2", Domain::from(IntervalSet::from_points([2.1]))),
        ])]);

        let reduced = m.intersection(&m_disc).unwrap();
        assert!(reduced.is_discrete());
        assert_eq!(reduced.points().unwrap().count(), 4);
    }

    #[test]
    fn empty_patch_set() {
        let empty = PatchSet::new([]);
        assert!(empty.is_empty());
        assert!(empty.is_discrete());
        assert_eq!(empty.points().unwrap().count(), 0);
    }
}
