//! # Filter Predicates
//!
//! A [`Filter`] is a conjunction of [`Predicate`]s. Each predicate constrains
//! one named field of a [`Document`]. The variants mirror what a document store
//! offers for a simple find: equality, numeric range, set membership and
//! case-insensitive substring.
//!
//! List-valued fields follow array semantics: the predicate matches when any
//! element matches. An absent field matches nothing.

use super::value::{Document, Value};

/// A single constraint on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field == value`. On a list field, the list must contain `value`.
    Eq { field: String, value: Value },
    /// `min <= field <= max` for numeric fields. Either bound may be open.
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// The field (or any element of it) equals one of `values`.
    AnyOf { field: String, values: Vec<String> },
    /// The field (or any element of it) contains `needle`, ignoring case.
    Contains { field: String, needle: String },
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Predicate::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn any_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Predicate::AnyOf {
            field: field.into(),
            values,
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// The field this predicate reads.
    pub fn field(&self) -> &str {
        match self {
            Predicate::Eq { field, .. }
            | Predicate::Range { field, .. }
            | Predicate::AnyOf { field, .. }
            | Predicate::Contains { field, .. } => field,
        }
    }

    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        let Some(actual) = doc.field(self.field()) else {
            return false;
        };

        match self {
            Predicate::Eq { value, .. } => match (&actual, value) {
                (Value::List(items), Value::Text(wanted)) => items.iter().any(|i| i == wanted),
                (actual, wanted) => actual == wanted,
            },
            Predicate::Range { min, max, .. } => match actual {
                Value::Number(n) => {
                    min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
                }
                _ => false,
            },
            Predicate::AnyOf { values, .. } => {
                actual.strings().any(|s| values.iter().any(|v| v == s))
            }
            Predicate::Contains { needle, .. } => {
                let needle = needle.to_lowercase();
                actual.strings().any(|s| s.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Conjunction of predicates. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate to the conjunction.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        self.predicates.iter().all(|p| p.matches(doc))
    }
}

impl FromIterator<Predicate> for Filter {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}
