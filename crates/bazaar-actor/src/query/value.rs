//! Field values as seen by the query layer.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single field value exposed by a [`Document`].
///
/// Only the shapes the query layer needs to compare are modelled. `List` holds
/// multi-valued string fields such as tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Text(_) => 1,
            Value::List(_) => 2,
        }
    }

    /// Total order used for sorting.
    ///
    /// Values of different shapes order by shape (numbers, then text, then
    /// lists) so a sort never panics on heterogeneous data.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Iterates the string members of a text or list value.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Value::Text(s) => std::slice::from_ref(s),
            Value::List(items) => items.as_slice(),
            Value::Number(_) => &[],
        };
        slice.iter().map(String::as_str)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Compares two possibly-absent values. Absent sorts before anything present.
pub fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(b),
    }
}

/// Read access to named fields of an entity.
///
/// Returning `None` means the field is absent on this entity. Predicates never
/// match an absent field.
pub trait Document {
    fn field(&self, name: &str) -> Option<Value>;
}
