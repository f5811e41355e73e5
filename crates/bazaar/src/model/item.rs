use crate::model::{ItemId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A marketplace listing.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](bazaar_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](bazaar_actor::ResourceActor).
/// Its `on_create` hook checks the owner against the user actor.
///
/// Serializes as `{id, owner, price, tags, description}`; a missing price is
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub owner: UserId,
    pub price: Option<f64>,
    pub tags: Vec<String>,
    pub description: String,
}

/// The queryable fields of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Id,
    Owner,
    Price,
    Tags,
    Description,
}

impl ItemField {
    pub const ALL: [ItemField; 5] = [
        ItemField::Id,
        ItemField::Owner,
        ItemField::Price,
        ItemField::Tags,
        ItemField::Description,
    ];

    /// Field name as used in query parameters and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::Owner => "owner",
            ItemField::Price => "price",
            ItemField::Tags => "tags",
            ItemField::Description => "description",
        }
    }

    /// Whether `orderBy` may name this field.
    pub fn is_sortable(self) -> bool {
        !matches!(self, ItemField::Tags)
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// One entry of the tag-frequency aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Trims tags and drops empty ones, keeping order and duplicates.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// The caller-supplied part of a new listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: String,
}

/// Payload for creating an item; the owner comes from the authenticated caller.
#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub owner: UserId,
    pub draft: ItemDraft,
}

/// Partial update of an item. `price: Some(None)` clears the price.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Update message sent to the item actor. Carries the caller so the entity can
/// enforce ownership.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub caller: UserId,
    pub patch: ItemPatch,
}
