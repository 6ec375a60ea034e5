//! Intervals on the extended real line with open or closed bounds.

use std::cmp::Ordering;
use std::fmt::Display;

/// An interval between two bounds, each independently open or closed.
///
/// Bounds may be infinite. An interval is *empty* when `hi < lo`, or when
/// `lo == hi` with at least one end excluded; the canonical empty
/// interval is `(1, 0)`. An interval is a *point* when `lo == hi` with
/// both ends included.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
    lo_closed: bool,
    hi_closed: bool,
}

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl Interval {
    /// Creates an interval from explicit bounds and inclusion flags.
    pub const fn new(lo: f64, hi: f64, lo_closed: bool, hi_closed: bool) -> Self {
        Self {
            lo,
            hi,
            lo_closed,
            hi_closed,
        }
    }

    /// `[lo, hi]`
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self::new(lo, hi, true, true)
    }

    /// `(lo, hi)`
    pub const fn open(lo: f64, hi: f64) -> Self {
        Self::new(lo, hi, false, false)
    }

    /// `(lo, hi]`
    pub const fn left_open(lo: f64, hi: f64) -> Self {
        Self::new(lo, hi, false, true)
    }

    /// `[lo, hi)`
    pub const fn right_open(lo: f64, hi: f64) -> Self {
        Self::new(lo, hi, true, false)
    }

    /// The single-point interval `[value, value]`.
    pub const fn point(value: f64) -> Self {
        Self::new(value, value, true, true)
    }

    /// The whole real line `[-∞, +∞]`.
    pub const fn everything() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, true, true)
    }

    /// The canonical empty interval `(1, 0)`.
    pub const fn empty() -> Self {
        Self::new(1.0, 0.0, true, true)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Accessors and predicates
// ─────────────────────────────────────────────────────────────────────

impl Interval {
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    pub const fn hi(&self) -> f64 {
        self.hi
    }

    pub const fn lo_closed(&self) -> bool {
        self.lo_closed
    }

    pub const fn hi_closed(&self) -> bool {
        self.hi_closed
    }

    /// Returns true if the interval contains no point.
    pub fn is_empty(&self) -> bool {
        self.hi < self.lo || (self.hi == self.lo && !(self.lo_closed && self.hi_closed))
    }

    /// Returns true if the interval is a single included point.
    pub fn is_point(&self) -> bool {
        self.lo == self.hi && self.lo_closed && self.hi_closed
    }

    /// Returns the value of a single-point interval.
    pub fn as_point(&self) -> Option<f64> {
        self.is_point().then_some(self.lo)
    }

    /// Returns true if `x` lies in the interval, honouring the inclusion
    /// flag on each end.
    pub fn contains(&self, x: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let above = if self.lo_closed { x >= self.lo } else { x > self.lo };
        let below = if self.hi_closed { x <= self.hi } else { x < self.hi };
        above && below
    }

    /// Returns true if the two intervals share no point.
    ///
    /// On coincident lower bounds: a single-point interval excluded at
    /// the shared bound is disjoint from the other; two intervals that
    /// both include the bound are not.
    pub fn is_disjoint(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        let (first, second) = match self.lo.partial_cmp(&other.lo) {
            Some(Ordering::Less) => (self, other),
            Some(Ordering::Greater) => (other, self),
            _ => {
                if self.is_point() && !other.lo_closed {
                    return true;
                }
                if other.is_point() && !self.lo_closed {
                    return true;
                }
                return false;
            }
        };
        !first.contains(second.lo)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Algebra
// ─────────────────────────────────────────────────────────────────────

impl Interval {
    /// Returns the intersection: componentwise max of lower bounds and
    /// min of upper bounds, with inclusion ANDed at coincident bounds.
    /// Disjoint intervals intersect to the canonical empty interval.
    pub fn intersection(&self, other: &Interval) -> Interval {
        if self.is_disjoint(other) {
            return Interval::empty();
        }
        let (lo, lo_closed) = match self.lo.partial_cmp(&other.lo) {
            Some(Ordering::Greater) => (self.lo, self.lo_closed),
            Some(Ordering::Less) => (other.lo, other.lo_closed),
            _ => (self.lo, self.lo_closed && other.lo_closed),
        };
        let (hi, hi_closed) = match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Less) => (self.hi, self.hi_closed),
            Some(Ordering::Greater) => (other.hi, other.hi_closed),
            _ => (self.hi, self.hi_closed && other.hi_closed),
        };
        Interval::new(lo, hi, lo_closed, hi_closed)
    }

    /// Returns `self` with `other` removed.
    ///
    /// Intervals are not closed under difference: the result is zero, one
    /// or two flanking intervals, each keeping `self`'s outer bound and
    /// taking the complement of `other`'s inclusion on the inner side.
    /// Flanking intervals may come out empty; [`IntervalSet`] drops them
    /// during normalization.
    ///
    /// [`IntervalSet`]: super::IntervalSet
    pub fn difference(&self, other: &Interval) -> Vec<Interval> {
        if self.is_empty() {
            return Vec::new();
        }
        if other.is_empty() || self.is_disjoint(other) {
            return vec![*self];
        }

        let left = Interval::new(self.lo, other.lo, self.lo_closed, !other.lo_closed);
        let right = Interval::new(other.hi, self.hi, !other.hi_closed, self.hi_closed);

        match (self.contains(other.lo), self.contains(other.hi)) {
            (true, true) => vec![left, right],
            (true, false) => vec![left],
            (false, true) => vec![right],
            // other covers self entirely
            (false, false) => Vec::new(),
        }
    }

    /// Returns the union: one merged interval when the operands touch or
    /// overlap, otherwise both operands sorted by lower bound. Empty
    /// operands drop out.
    pub fn union(&self, other: &Interval) -> Vec<Interval> {
        if self.is_empty() {
            return if other.is_empty() {
                Vec::new()
            } else {
                vec![*other]
            };
        }
        if other.is_empty() {
            return vec![*self];
        }
        if self.is_disjoint(other) {
            return if self.lo <= other.lo {
                vec![*self, *other]
            } else {
                vec![*other, *self]
            };
        }
        vec![self.merged(other)]
    }

    /// Hull of two non-disjoint intervals. Inclusion is ORed at
    /// coincident bounds.
    pub(crate) fn merged(&self, other: &Interval) -> Interval {
        let (lo, lo_closed) = match self.lo.partial_cmp(&other.lo) {
            Some(Ordering::Less) => (self.lo, self.lo_closed),
            Some(Ordering::Greater) => (other.lo, other.lo_closed),
            _ => (self.lo, self.lo_closed || other.lo_closed),
        };
        let (hi, hi_closed) = match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Greater) => (self.hi, self.hi_closed),
            Some(Ordering::Less) => (other.hi, other.hi_closed),
            _ => (self.hi, self.hi_closed || other.hi_closed),
        };
        Interval::new(lo, hi, lo_closed, hi_closed)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        let open = if self.lo_closed { '[' } else { '(' };
        let close = if self.hi_closed { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.lo, self.hi, close)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
