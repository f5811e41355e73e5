//! Translation of a parsed [`ItemQuery`] into the store's query model.
//!
//! Pure functions; nothing here touches an actor.

use super::{ItemFilter, ItemQuery, ItemSort};
use crate::model::ItemField;
use bazaar_actor::query::{Filter, FindQuery, Page, Predicate, Projection, Sort, Value};

/// Document-field value of a user id. IDs compare numerically, so sorting by
/// `owner` or `id` follows creation order.
pub fn id_value(n: u32) -> Value {
    Value::Number(f64::from(n))
}

impl ItemFilter {
    /// One predicate per supplied parameter, AND-ed together.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(owner) = self.owner {
            filter.push(Predicate::eq(ItemField::Owner.as_str(), id_value(owner.0)));
        }
        if let Some(price) = self.price {
            filter.push(Predicate::eq(ItemField::Price.as_str(), price));
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            filter.push(Predicate::range(
                ItemField::Price.as_str(),
                self.price_min,
                self.price_max,
            ));
        }
        if !self.tags.is_empty() {
            filter.push(Predicate::any_of(
                ItemField::Tags.as_str(),
                self.tags.clone(),
            ));
        }
        if let Some(text) = &self.text {
            filter.push(Predicate::contains(
                ItemField::Description.as_str(),
                text.clone(),
            ));
        }
        filter
    }
}

impl From<ItemSort> for Sort {
    fn from(sort: ItemSort) -> Self {
        Sort {
            field: sort.field.as_str().to_string(),
            direction: sort.direction,
        }
    }
}

impl ItemQuery {
    pub fn find_query(&self) -> FindQuery {
        let mut query =
            FindQuery::new(self.filter.to_filter()).paged(Page::new(self.offset, self.limit));
        if let Some(sort) = self.sort {
            query = query.sorted(sort.into());
        }
        query
    }

    pub fn projection(&self) -> Projection {
        match &self.fields {
            None => Projection::all(),
            Some(fields) => Projection::only(fields.iter().map(|f| f.as_str())),
        }
    }
}
