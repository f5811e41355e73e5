//! Sorting and pagination.

use super::value::{compare_optional, Document};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Sort by one field.
///
/// Sorting is stable in both directions: entities that tie on the key keep the
/// store's natural (insertion) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    pub fn compare<D: Document>(&self, a: &D, b: &D) -> Ordering {
        let ord = compare_optional(
            a.field(&self.field).as_ref(),
            b.field(&self.field).as_ref(),
        );
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }

    pub fn apply<D: Document>(&self, docs: &mut [D]) {
        // slice::sort_by is stable
        docs.sort_by(|a, b| self.compare(a, b));
    }
}

/// Skip/limit window applied after sorting. `limit: None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Page {
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Self { offset, limit }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let window = items.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => window.take(limit).collect(),
            None => window.collect(),
        }
    }
}
