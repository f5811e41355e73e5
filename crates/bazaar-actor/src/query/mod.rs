//! # Query Model
//!
//! Storage-independent description of a read against a resource collection.
//!
//! A [`FindQuery`] combines a [`Filter`] (conjunction of [`Predicate`]s), an
//! optional [`Sort`] and a [`Page`] window. The [`ResourceActor`](crate::ResourceActor)
//! runs it against its collection in natural (insertion) order:
//!
//! 1. keep documents matching every predicate
//! 2. stable-sort by the sort key, if any
//! 3. skip `offset`, take `limit`
//!
//! Projection ([`Projection`]) and aggregation ([`group_count`]) are separate
//! pure functions so they can be tested without an actor.

pub mod aggregate;
pub mod order;
pub mod predicate;
pub mod projection;
pub mod value;

pub use aggregate::{group_count, Bucket};
pub use order::{Direction, Page, Sort};
pub use predicate::{Filter, Predicate};
pub use projection::{Projection, Record};
pub use value::{Document, Value};

/// Filter, sort and page a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub page: Page,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn paged(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Runs the query over `docs`, which must be in natural order.
    pub fn run<'a, D, I>(&self, docs: I) -> Vec<D>
    where
        D: Document + Clone + 'a,
        I: IntoIterator<Item = &'a D>,
    {
        let mut selected: Vec<D> = docs
            .into_iter()
            .filter(|doc| self.filter.matches(*doc))
            .cloned()
            .collect();
        if let Some(sort) = &self.sort {
            sort.apply(&mut selected);
        }
        self.page.apply(selected)
    }
}

/// Number of documents in `docs` matching `filter`.
pub fn count<'a, D, I>(filter: &Filter, docs: I) -> usize
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    docs.into_iter().filter(|doc| filter.matches(*doc)).count()
}
