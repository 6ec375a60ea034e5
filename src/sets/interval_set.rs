//! A canonical container for sorted, disjoint intervals.
//!
//! [`IntervalSet`] wraps a `Vec<Interval>` and guarantees the **canonical
//! invariant** at all times: members are non-empty, sorted by lower
//! bound, and no two members could be merged into a single interval.
//! Construction normalizes arbitrary input; every operation returns a
//! freshly normalized set.

use std::fmt::Display;
use std::ops::Deref;

use itertools::Itertools;

use super::error::SetError;
use super::interval::Interval;

/// A union of disjoint intervals, sorted by lower bound.
///
/// Read access is transparent via `Deref<Target = [Interval]>`, so all
/// immutable slice methods (`.len()`, `.iter()`, indexing, `.first()`,
/// ...) are available directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalSet(Vec<Interval>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl IntervalSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The whole real line.
    pub fn everything() -> Self {
        Self(vec![Interval::everything()])
    }

    /// Builds a discrete set from single points. Duplicates collapse.
    pub fn from_points(points: impl IntoIterator<Item = f64>) -> Self {
        points.into_iter().map(Interval::point).collect()
    }

    /// Sorts by lower bound, drops empties, and merges overlapping or
    /// joinable-touching intervals in place.
    fn normalize(&mut self) {
        self.0.retain(|i| !i.is_empty());
        if self.0.len() <= 1 {
            return;
        }
        self.0.sort_by(|a, b| {
            a.lo()
                .partial_cmp(&b.lo())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut merged: Vec<Interval> = Vec::with_capacity(self.0.len());
        for interval in self.0.drain(..) {
            match merged.last_mut() {
                Some(last) if !last.is_disjoint(&interval) => *last = last.merged(&interval),
                _ => merged.push(interval),
            }
        }
        self.0 = merged;
    }

    fn is_canonical(&self) -> bool {
        self.0.iter().all(|i| !i.is_empty())
            && self
                .0
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.lo() <= b.lo() && a.is_disjoint(b))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Predicates
// ─────────────────────────────────────────────────────────────────────

impl IntervalSet {
    /// Returns true if every member interval is a single point.
    pub fn is_discrete(&self) -> bool {
        self.0.iter().all(Interval::is_point)
    }

    /// Returns true if any member interval contains `x`.
    pub fn contains(&self, x: f64) -> bool {
        self.0.iter().any(|i| i.contains(x))
    }

    /// Iterates the points of a discrete set.
    ///
    /// Defined only when the set is a union of single points; returns
    /// [`SetError::NotDiscrete`] otherwise.
    pub fn members(&self) -> Result<impl Iterator<Item = f64> + '_, SetError> {
        if !self.is_discrete() {
            return Err(SetError::NotDiscrete);
        }
        Ok(self.0.iter().filter_map(Interval::as_point))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Set operations
// ─────────────────────────────────────────────────────────────────────

impl IntervalSet {
    /// Returns the intersection of `self` and `other`.
    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        debug_assert!(self.is_canonical() && other.is_canonical());
        self.0
            .iter()
            .cartesian_product(&other.0)
            .map(|(a, b)| a.intersection(b))
            .collect()
    }

    /// Returns `self` with `other` removed.
    ///
    /// Folds the single-interval difference over the subtrahend's
    /// members, re-normalizing after each step.
    pub fn difference(&self, other: &IntervalSet) -> IntervalSet {
        let mut result = self.clone();
        for j in &other.0 {
            result = result.0.iter().flat_map(|i| i.difference(j)).collect();
        }
        result
    }

    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        self.0.iter().chain(&other.0).copied().collect()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access and conversions
// ─────────────────────────────────────────────────────────────────────

impl Deref for IntervalSet {
    type Target = [Interval];

    fn deref(&self) -> &[Interval] {
        &self.0
    }
}

impl AsRef<[Interval]> for IntervalSet {
    fn as_ref(&self) -> &[Interval] {
        &self.0
    }
}

impl From<Vec<Interval>> for IntervalSet {
    /// Creates a set from arbitrary intervals, normalizing on construction.
    fn from(vec: Vec<Interval>) -> Self {
        let mut set = Self(vec);
        set.normalize();
        set
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        Self::from(vec![interval])
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "∅");
        }
        write!(f, "{}", self.0.iter().join(" ∪ "))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for IntervalSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IntervalSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Vec::<Interval>::deserialize(deserializer)?;
        Ok(Self::from(vec))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
