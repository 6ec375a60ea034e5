//! Solution enumeration by chronological backtracking, with optional
//! arc-consistency lookahead.

use std::collections::HashSet;
use std::str::FromStr;

use tracing::debug;

use super::ac3::ac3;
use super::error::SolveError;
use crate::constraints::Constraint;
use crate::sets::Value;
use crate::space::Space;
use crate::{Labeling, Name};

/// Solution method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Chronological backtracking over the current domains.
    Backtrack,
    /// Backtracking with AC-3 propagation after every tentative
    /// assignment.
    AcLookahead,
}

impl FromStr for Method {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, SolveError> {
        match s {
            "backtrack" => Ok(Method::Backtrack),
            "ac-lookahead" => Ok(Method::AcLookahead),
            other => Err(SolveError::UnknownMethod(other.to_owned())),
        }
    }
}

/// Enumerates every complete labeling of `space` that satisfies all of
/// its constraints.
///
/// Solutions stream lazily, each exactly once, in the order induced by
/// the variable ordering (default: insertion order) and each domain's
/// member order. Both methods yield the same solution set; lookahead
/// prunes infeasible branches earlier at the cost of a space copy and an
/// AC-3 run per tentative assignment.
///
/// Fails with [`SolveError::NotDiscrete`] unless every current domain is
/// enumerable, and with [`SolveError::InvalidOrdering`] if a supplied
/// ordering is not a permutation of the space's variable names.
pub fn solve<'s>(
    space: &'s Space,
    method: Method,
    ordering: Option<&[Name]>,
) -> Result<Solutions<'s>, SolveError> {
    if !space.is_discrete() {
        return Err(SolveError::NotDiscrete);
    }
    let ordering = match ordering {
        Some(names) => validated_ordering(space, names)?,
        None => space.variable_names().map(String::from).collect(),
    };
    debug!(?method, variables = ordering.len(), "starting solve");
    let inner = match method {
        Method::Backtrack => Inner::Backtrack(BacktrackIter::new(space, ordering)),
        Method::AcLookahead => Inner::Lookahead(LookaheadIter::new(space, ordering)),
    };
    Ok(Solutions { inner })
}

fn validated_ordering(space: &Space, names: &[Name]) -> Result<Vec<Name>, SolveError> {
    let known: HashSet<&str> = space.variable_names().collect();
    let distinct: HashSet<&str> = names.iter().map(Name::as_str).collect();
    let is_permutation = names.len() == known.len()
        && distinct.len() == names.len()
        && names.iter().all(|n| known.contains(n.as_str()));
    if !is_permutation {
        return Err(SolveError::InvalidOrdering);
    }
    Ok(names.to_vec())
}

/// Lazy stream of solutions; see [`solve`].
pub struct Solutions<'s> {
    inner: Inner<'s>,
}

enum Inner<'s> {
    Backtrack(BacktrackIter<'s>),
    Lookahead(LookaheadIter<'s>),
}

impl Iterator for Solutions<'_> {
    type Item = Labeling;

    fn next(&mut self) -> Option<Labeling> {
        match &mut self.inner {
            Inner::Backtrack(iter) => iter.next(),
            Inner::Lookahead(iter) => iter.next(),
        }
    }
}

/// One value cursor per open decision level.
struct Cursor {
    values: Vec<Value>,
    next: usize,
}

impl Cursor {
    fn new(values: Vec<Value>) -> Self {
        Self { values, next: 0 }
    }

    fn advance(&mut self) -> Option<Value> {
        let value = self.values.get(self.next).cloned();
        self.next += 1;
        value
    }
}

fn members_of(space: &Space, name: &str) -> Vec<Value> {
    // Enumerability is checked before the search starts.
    space
        .domain(name)
        .map(|d| d.members().unwrap_or_default())
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────
// Chronological backtracking
// ─────────────────────────────────────────────────────────────────────

/// Depth-first walk over the assignment tree: at each level, bind the
/// next variable of the ordering to each of its domain values in turn;
/// prune as soon as a partial labeling turns inconsistent; yield every
/// complete labeling that satisfies the space.
struct BacktrackIter<'s> {
    space: &'s Space,
    ordering: Vec<Name>,
    stack: Vec<Cursor>,
    label: Labeling,
    started: bool,
    done: bool,
}

impl<'s> BacktrackIter<'s> {
    fn new(space: &'s Space, ordering: Vec<Name>) -> Self {
        Self {
            space,
            ordering,
            stack: Vec::new(),
            label: Labeling::new(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for BacktrackIter<'_> {
    type Item = Labeling;

    fn next(&mut self) -> Option<Labeling> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.ordering.is_empty() {
                self.done = true;
                return self.space.satisfied(&self.label).then(|| self.label.clone());
            }
            if self.space.consistent(&self.label) {
                self.stack
                    .push(Cursor::new(members_of(self.space, &self.ordering[0])));
            } else {
                self.done = true;
                return None;
            }
        }
        loop {
            let depth = self.stack.len();
            let Some(cursor) = self.stack.last_mut() else {
                break;
            };
            let level = depth - 1;
            let Some(value) = cursor.advance() else {
                self.stack.pop();
                self.label.remove(&self.ordering[level]);
                continue;
            };
            self.label.insert(self.ordering[level].clone(), value);
            if depth == self.ordering.len() {
                if self.space.satisfied(&self.label) {
                    return Some(self.label.clone());
                }
            } else if self.space.consistent(&self.label) {
                self.stack
                    .push(Cursor::new(members_of(self.space, &self.ordering[depth])));
            }
        }
        self.done = true;
        None
    }
}

// ─────────────────────────────────────────────────────────────────────
// AC-lookahead
// ─────────────────────────────────────────────────────────────────────

/// Backtracking interleaved with propagation: before descending on
/// `v = x`, build a child space whose constraints are the node's plus a
/// pin of `v` to `x`, run AC-3 on it, and search within the reduced
/// child. The outer space is never mutated; variables and constraints
/// are shared, only domains are copied.
struct LookaheadIter<'s> {
    space: &'s Space,
    ordering: Vec<Name>,
    stack: Vec<LookaheadFrame>,
    label: Labeling,
    started: bool,
    done: bool,
}

/// A node of the lookahead tree: the (already reduced) space in effect
/// there and the cursor over the level's candidate values.
struct LookaheadFrame {
    space: Space,
    cursor: Cursor,
}

impl<'s> LookaheadIter<'s> {
    fn new(space: &'s Space, ordering: Vec<Name>) -> Self {
        Self {
            space,
            ordering,
            stack: Vec::new(),
            label: Labeling::new(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for LookaheadIter<'_> {
    type Item = Labeling;

    fn next(&mut self) -> Option<Labeling> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.ordering.is_empty() {
                self.done = true;
                return self.space.satisfied(&self.label).then(|| self.label.clone());
            }
            if self.space.consistent(&self.label) {
                let root = self.space.clone();
                let cursor = Cursor::new(members_of(&root, &self.ordering[0]));
                self.stack.push(LookaheadFrame { space: root, cursor });
            } else {
                self.done = true;
                return None;
            }
        }
        loop {
            let depth = self.stack.len();
            let Some(frame) = self.stack.last_mut() else {
                break;
            };
            let level = depth - 1;
            let Some(value) = frame.cursor.advance() else {
                self.stack.pop();
                self.label.remove(&self.ordering[level]);
                continue;
            };
            self.label
                .insert(self.ordering[level].clone(), value.clone());
            if depth == self.ordering.len() {
                // A complete labeling; the pin constraints accumulated on
                // the path are trivially satisfied by their own bindings.
                if frame.space.satisfied(&self.label) {
                    return Some(self.label.clone());
                }
                continue;
            }
            let Some(variable) = frame.space.variable(&self.ordering[level]) else {
                continue;
            };
            let pin = Constraint::fixed_value_unchecked(variable, value);
            let mut child = frame.space.child_with(pin);
            ac3(&mut child);
            if child.consistent(&self.label) {
                let cursor = Cursor::new(members_of(&child, &self.ordering[depth]));
                self.stack.push(LookaheadFrame {
                    space: child,
                    cursor,
                });
            }
        }
        self.done = true;
        None
    }
}
