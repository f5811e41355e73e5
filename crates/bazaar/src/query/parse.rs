//! Validating parse from [`QueryParams`] into a typed query.

use super::*;
use crate::model::{ItemField, UserId};
use bazaar_actor::query::Direction;

/// The filtering part of a listing request. Every field is optional; an empty
/// filter matches every item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub owner: Option<UserId>,
    pub price: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Matches items carrying at least one of these. Empty means no constraint.
    pub tags: Vec<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSort {
    pub field: ItemField,
    pub direction: Direction,
}

/// A fully validated listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub filter: ItemFilter,
    /// `None` keeps creation order.
    pub sort: Option<ItemSort>,
    pub offset: usize,
    /// `None` is unbounded.
    pub limit: Option<usize>,
    /// `None` returns every field.
    pub fields: Option<Vec<ItemField>>,
}

fn parse_price(name: &'static str, raw: &str) -> Result<f64, InvalidParameter> {
    let n: f64 = raw
        .parse()
        .map_err(|_| InvalidParameter::new(name, raw, "expected a number"))?;
    if !n.is_finite() {
        return Err(InvalidParameter::new(name, raw, "expected a finite number"));
    }
    Ok(n)
}

fn parse_count(name: &'static str, raw: &str) -> Result<usize, InvalidParameter> {
    // usize::from_str would also take "+3"
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidParameter::new(name, raw, "expected a non-negative integer"));
    }
    raw.parse()
        .map_err(|_| InvalidParameter::new(name, raw, "integer out of range"))
}

fn optional<T>(
    params: &QueryParams,
    name: &'static str,
    parse: impl FnOnce(&'static str, &str) -> Result<T, InvalidParameter>,
) -> Result<Option<T>, InvalidParameter> {
    params.single(name)?.map(|raw| parse(name, raw)).transpose()
}

fn parse_field(name: &'static str, raw: &str) -> Result<ItemField, InvalidParameter> {
    raw.parse::<ItemField>()
        .map_err(|_| InvalidParameter::new(name, raw, "unknown field"))
}

impl ItemFilter {
    /// Reads `owner`, `price`, `priceMin`, `priceMax`, `tags` and `text`.
    /// Other parameters are ignored.
    pub fn parse(params: &QueryParams) -> Result<Self, InvalidParameter> {
        let owner = optional(params, OWNER, |name, raw| {
            raw.parse::<UserId>()
                .map_err(|_| InvalidParameter::new(name, raw, "expected a user id"))
        })?;
        let text = params
            .single(TEXT)?
            .filter(|t| !t.is_empty())
            .map(String::from);

        Ok(Self {
            owner,
            price: optional(params, PRICE, parse_price)?,
            price_min: optional(params, PRICE_MIN, parse_price)?,
            price_max: optional(params, PRICE_MAX, parse_price)?,
            tags: params.list(TAGS),
            text,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ItemQuery {
    /// Parses the filter plus `orderBy`, `order`, `offset`, `limit` and `fields`.
    ///
    /// `order` is validated even without `orderBy`, where it has no effect.
    pub fn parse(params: &QueryParams) -> Result<Self, InvalidParameter> {
        let filter = ItemFilter::parse(params)?;

        let direction = optional(params, ORDER, |name, raw| {
            match raw.to_ascii_lowercase().as_str() {
                "asc" => Ok(Direction::Asc),
                "desc" => Ok(Direction::Desc),
                _ => Err(InvalidParameter::new(name, raw, "expected `asc` or `desc`")),
            }
        })?
        .unwrap_or_default();

        let sort = optional(params, ORDER_BY, |name, raw| {
            let field = parse_field(name, raw)?;
            if !field.is_sortable() {
                return Err(InvalidParameter::new(name, raw, "field cannot be sorted on"));
            }
            Ok(ItemSort { field, direction })
        })?;

        let offset = optional(params, OFFSET, parse_count)?.unwrap_or(0);
        // limit=0 means "no limit", as it does for the document store's find()
        let limit = optional(params, LIMIT, parse_count)?.filter(|&n| n > 0);

        let requested = params.list(FIELDS);
        let fields = if requested.is_empty() {
            None
        } else {
            let fields = requested
                .iter()
                .map(|raw| parse_field(FIELDS, raw))
                .collect::<Result<Vec<_>, _>>()?;
            Some(fields)
        };

        Ok(Self {
            filter,
            sort,
            offset,
            limit,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn rejected(pairs: &[(&str, &str)]) -> InvalidParameter {
        ItemQuery::parse(&params(pairs)).unwrap_err()
    }

    #[test]
    fn test_empty_params_mean_no_constraints() {
        let query = ItemQuery::parse(&QueryParams::new()).unwrap();
        assert_eq!(query, ItemQuery::default());
        assert!(query.filter.is_empty());
    }

    #[test]
    fn test_parses_every_parameter() {
        let query = ItemQuery::parse(&params(&[
            ("owner", "user_2"),
            ("price", "10"),
            ("priceMin", "1.5"),
            ("priceMax", "20"),
            ("tags", "lamp, desk"),
            ("text", " Oak "),
            ("orderBy", "price"),
            ("order", "DESC"),
            ("offset", "3"),
            ("limit", "4"),
            ("fields", "description,price"),
        ]))
        .unwrap();

        assert_eq!(query.filter.owner, Some(UserId(2)));
        assert_eq!(query.filter.price, Some(10.0));
        assert_eq!(query.filter.price_min, Some(1.5));
        assert_eq!(query.filter.price_max, Some(20.0));
        assert_eq!(query.filter.tags, vec!["lamp", "desk"]);
        assert_eq!(query.filter.text.as_deref(), Some("Oak"));
        assert_eq!(
            query.sort,
            Some(ItemSort {
                field: ItemField::Price,
                direction: Direction::Desc
            })
        );
        assert_eq!((query.offset, query.limit), (3, Some(4)));
        assert_eq!(
            query.fields,
            Some(vec![ItemField::Description, ItemField::Price])
        );
    }

    #[test]
    fn test_non_numeric_values_are_rejected_by_name() {
        for (name, value) in [
            ("price", "abc"),
            ("price", ""),
            ("priceMin", "NaN"),
            ("priceMax", "inf"),
            ("offset", "-1"),
            ("offset", "1.5"),
            ("limit", "ten"),
            ("limit", "+2"),
        ] {
            let err = rejected(&[(name, value)]);
            assert_eq!(err.name, name, "{name}={value}");
            assert_eq!(err.value, value.trim());
        }
    }

    #[test]
    fn test_unknown_fields_and_orders_are_rejected() {
        assert_eq!(rejected(&[("orderBy", "colour")]).name, "orderBy");
        assert_eq!(rejected(&[("orderBy", "tags")]).name, "orderBy");
        assert_eq!(rejected(&[("order", "up")]).name, "order");
        assert_eq!(rejected(&[("fields", "price,secret")]).value, "secret");
        assert_eq!(rejected(&[("owner", "bob")]).name, "owner");
    }

    #[test]
    fn test_repeated_scalar_is_rejected_but_tags_union() {
        assert_eq!(rejected(&[("price", "1"), ("price", "2")]).name, "price");

        let query = ItemQuery::parse(&params(&[("tags", "a"), ("tags", "b,a")])).unwrap();
        assert_eq!(query.filter.tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_limit_zero_is_unbounded_and_empty_text_ignored() {
        let query = ItemQuery::parse(&params(&[("limit", "0"), ("text", "  "), ("tags", ",")])).unwrap();
        assert_eq!(query.limit, None);
        assert!(query.filter.is_empty());
    }

    #[test]
    fn test_filter_parse_ignores_paging_parameters() {
        let filter = ItemFilter::parse(&params(&[
            ("limit", "nope"),
            ("orderBy", "colour"),
            ("fields", "secret"),
            ("price", "5"),
        ]))
        .unwrap();
        assert_eq!(filter.price, Some(5.0));
    }

    #[test]
    fn test_unrecognized_parameters_are_ignored() {
        let query = ItemQuery::parse(&params(&[("colour", "red"), ("page", "x")])).unwrap();
        assert_eq!(query, ItemQuery::default());
    }
}
