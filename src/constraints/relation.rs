//! Binary comparison relations between labeled values.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::sets::Value;

/// The comparison applied by a binary relational constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Relation {
    /// Evaluates the relation on two values, using the semantic
    /// comparison of [`Value::compare`]. Values of unrelated kinds (say
    /// a string and a number) satisfy only `NotEqual`.
    pub fn holds(&self, left: &Value, right: &Value) -> bool {
        let ord = left.compare(right);
        match self {
            Relation::Equal => ord == Some(Ordering::Equal),
            Relation::NotEqual => ord != Some(Ordering::Equal),
            Relation::Less => ord == Some(Ordering::Less),
            Relation::LessEqual => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
            Relation::Greater => ord == Some(Ordering::Greater),
            Relation::GreaterEqual => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Relation::Equal => "=",
            Relation::NotEqual => "≠",
            Relation::Less => "<",
            Relation::LessEqual => "≤",
            Relation::Greater => ">",
            Relation::GreaterEqual => "≥",
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
