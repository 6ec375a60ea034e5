//! Concrete values a variable can be labeled with.

use std::cmp::Ordering;
use std::fmt::Display;

use ordered_float::OrderedFloat;

/// A labelable value: an integer, a real, or a string.
///
/// `Value` is `Eq + Ord + Hash`, so values can live in ordered sets and
/// iterate deterministically. Exact equality distinguishes the variants;
/// relational constraints instead use [`Value::compare`], under which the
/// two numeric variants share one axis (so `2` and `2.0` coincide).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Int(i64),
    Real(OrderedFloat<f64>),
    Str(String),
}

impl Value {
    /// Returns the numeric content, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Real(r) => Some(r.into_inner()),
            Value::Str(_) => None,
        }
    }

    /// Semantic comparison used by relational constraints.
    ///
    /// Numbers compare across the `Int`/`Real` variants and strings
    /// compare lexicographically; unrelated kinds are unordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                a.partial_cmp(&b)
            }
        }
    }

    /// Whether two values coincide under [`Value::compare`].
    pub fn coincides(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(OrderedFloat(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}
