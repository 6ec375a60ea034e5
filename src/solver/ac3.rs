//! Node- and arc-consistency domain reduction.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::constraints::Constraint;
use crate::sets::{DiscreteSet, Domain, IntervalSet, Value};
use crate::space::Space;
use crate::{Labeling, Name};

/// Reduces the domains of `space` to the arc-consistent fixed point.
///
/// Arcs pair the variables of each constraint pessimistically: every
/// constraint is treated as coupling all of its variables pairwise. The
/// initial pass enforces node consistency for every (variable,
/// constraint) pair and revises every arc once; the worklist loop then
/// re-enqueues the arcs pointing *into* a variable whenever its domain
/// shrinks, until nothing changes.
///
/// Arcs whose endpoint domains cannot be enumerated are skipped; node
/// consistency still applies to them. Reduction only ever removes
/// values, and running it again is a no-op.
pub fn ac3(space: &mut Space) {
    let names: Vec<Name> = space.variable_names().map(String::from).collect();
    let (domains, constraints) = space.reduction_parts();

    // The constraint graph: nodes are variable indices, edges couple the
    // variables referenced by a common constraint.
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let mut arcs = DiGraphMap::<usize, ()>::new();
    for i in 0..names.len() {
        arcs.add_node(i);
    }
    for constraint in constraints {
        for a in constraint.vnames() {
            for b in constraint.vnames() {
                if a != b {
                    if let (Some(&ia), Some(&ib)) =
                        (index.get(a.as_str()), index.get(b.as_str()))
                    {
                        arcs.add_edge(ia, ib, ());
                    }
                }
            }
        }
    }

    // Node consistency.
    for name in &names {
        for constraint in constraints {
            unary(domains, constraint, name);
        }
    }

    // Revise every arc once, then work the queue to the fixed point.
    let mut worklist: VecDeque<(usize, usize)> = VecDeque::new();
    let mut queued: HashSet<(usize, usize)> = HashSet::new();
    for (ia, ib, _) in arcs.all_edges() {
        if revise(domains, constraints, &names[ia], &names[ib]) {
            for w in arcs.neighbors(ia) {
                if queued.insert((w, ia)) {
                    worklist.push_back((w, ia));
                }
            }
        }
    }
    while let Some((ia, ib)) = worklist.pop_front() {
        queued.remove(&(ia, ib));
        if revise(domains, constraints, &names[ia], &names[ib]) {
            for w in arcs.neighbors(ia) {
                if queued.insert((w, ia)) {
                    worklist.push_back((w, ia));
                }
            }
        }
    }

    debug!(variables = names.len(), "arc consistency fixed point reached");
}

/// Revises the arc `(name1, name2)` under every constraint. Returns
/// whether `name1`'s domain changed.
fn revise(
    domains: &mut IndexMap<Name, Domain>,
    constraints: &[Constraint],
    name1: &str,
    name2: &str,
) -> bool {
    let mut changed = false;
    for constraint in constraints {
        changed |= binary(domains, constraint, name1, name2);
    }
    changed
}

/// Node-consistency reduction: intersects `name`'s domain with the
/// constraint's projection for it. Returns whether the domain changed.
pub(crate) fn unary(
    domains: &mut IndexMap<Name, Domain>,
    constraint: &Constraint,
    name: &str,
) -> bool {
    let Some(projected) = constraint.projected(name) else {
        return false;
    };
    let Some(current) = domains.get_mut(name) else {
        return false;
    };
    // Projections are kind-checked at constraint construction.
    let Ok(reduced) = current.intersection(projected) else {
        return false;
    };
    let changed = reduced != *current;
    *current = reduced;
    changed
}

/// Arc-consistency reduction of `name1` against `name2` under one
/// constraint: removes from `name1` every value for which no value of
/// `name2` yields a consistent pair. Returns whether the domain changed.
pub(crate) fn binary(
    domains: &mut IndexMap<Name, Domain>,
    constraint: &Constraint,
    name1: &str,
    name2: &str,
) -> bool {
    if !(constraint.references(name1) && constraint.references(name2)) {
        return false;
    }
    let (Some(d1), Some(d2)) = (domains.get(name1), domains.get(name2)) else {
        return false;
    };
    let (Ok(candidates), Ok(witnesses)) = (d1.members(), d2.members()) else {
        // Arcs over non-enumerable domains cannot be revised.
        return false;
    };

    let unsupported: Vec<Value> = candidates
        .into_iter()
        .filter(|x| {
            !witnesses.iter().any(|y| {
                let lab: Labeling = Labeling::from([
                    (name1.to_owned(), x.clone()),
                    (name2.to_owned(), y.clone()),
                ]);
                constraint.consistent(&lab)
            })
        })
        .collect();

    if unsupported.is_empty() {
        return false;
    }
    debug!(
        variable = name1,
        removed = unsupported.len(),
        "arc reduction removed unsupported values"
    );
    if let Some(domain) = domains.get_mut(name1) {
        remove_values(domain, &unsupported);
    }
    true
}

/// Removes concrete values from a domain in place: element removal for
/// discrete sets, difference with a point set for continuous ones.
fn remove_values(domain: &mut Domain, values: &[Value]) {
    match domain {
        Domain::Discrete(DiscreteSet::Finite(elements)) => {
            for value in values {
                elements.remove(value);
            }
        }
        // The universe is not enumerable, so reduction never reaches it.
        Domain::Discrete(DiscreteSet::Universe) => {}
        Domain::Continuous(set) => {
            let points = IntervalSet::from_points(values.iter().filter_map(Value::as_f64));
            *set = set.difference(&points);
        }
    }
}
