//! # Item Query Engine
//!
//! Turns the flat string parameters of a listing request into a typed
//! [`ItemQuery`] and then into the store's [`FindQuery`](bazaar_actor::query::FindQuery).
//!
//! Three steps, each a pure function:
//!
//! 1. [`QueryParams`]: the raw `name=value` pairs as received
//! 2. [`ItemQuery::parse`]: one validating pass; every malformed value is an
//!    [`InvalidParameter`] naming the parameter
//! 3. [`ItemQuery::find_query`] / [`ItemQuery::projection`]: translation for
//!    the item actor and for shaping the output
//!
//! | Parameter | Effect |
//! |---|---|
//! | `owner` | `item.owner == owner` |
//! | `price` | `item.price == price` |
//! | `priceMin` / `priceMax` | inclusive price bounds |
//! | `tags` | comma-separated; at least one listed tag present |
//! | `text` | case-insensitive substring of `description` |
//! | `orderBy`, `order` | stable sort, `asc` by default |
//! | `offset`, `limit` | page window; `limit=0` is unbounded |
//! | `fields` | keep `id` plus the named fields |
//!
//! Counting uses [`ItemFilter::parse`] alone, so sort, page and projection
//! parameters are neither applied nor validated there.

pub mod params;
pub mod parse;
pub mod plan;

pub use params::QueryParams;
pub use parse::{ItemFilter, ItemQuery, ItemSort};

use thiserror::Error;

pub const OWNER: &str = "owner";
pub const PRICE: &str = "price";
pub const PRICE_MIN: &str = "priceMin";
pub const PRICE_MAX: &str = "priceMax";
pub const TAGS: &str = "tags";
pub const TEXT: &str = "text";
pub const ORDER_BY: &str = "orderBy";
pub const ORDER: &str = "order";
pub const OFFSET: &str = "offset";
pub const LIMIT: &str = "limit";
pub const FIELDS: &str = "fields";

/// A query parameter whose value cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for parameter `{name}`: {reason}")]
pub struct InvalidParameter {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl InvalidParameter {
    pub fn new(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
