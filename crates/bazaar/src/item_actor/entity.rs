//! ActorEntity trait implementation for the Item domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`Item`] to be managed by the generic [`bazaar_actor::ResourceActor`].
//!
//! The item actor's context is a [`UserClient`]: `on_create` confirms the
//! owner is a registered user before the item is stored. Ownership of updates
//! is checked here too, since [`ItemUpdate`] carries the caller.

use super::error::ItemError;
use crate::clients::UserClient;
use crate::model::{normalize_tags, Item, ItemCreate, ItemField, ItemId, ItemUpdate};
use crate::query::plan::id_value;
use async_trait::async_trait;
use bazaar_actor::query::{Document, Value};
use bazaar_actor::{ActorClient, ActorEntity};

fn validate_price(price: Option<f64>) -> Result<Option<f64>, ItemError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(ItemError::ValidationError(format!(
            "price must be a non-negative number, got {p}"
        ))),
        other => Ok(other),
    }
}

fn validate_description(description: &str) -> Result<String, ItemError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ItemError::ValidationError(
            "description must not be empty".into(),
        ));
    }
    Ok(description.to_string())
}

impl Document for Item {
    fn field(&self, name: &str) -> Option<Value> {
        match name.parse::<ItemField>().ok()? {
            ItemField::Id => Some(id_value(self.id.0)),
            ItemField::Owner => Some(id_value(self.owner.0)),
            ItemField::Price => self.price.map(Value::Number),
            ItemField::Tags => Some(Value::List(self.tags.clone())),
            ItemField::Description => Some(Value::Text(self.description.clone())),
        }
    }
}

#[async_trait]
impl ActorEntity for Item {
    type Id = ItemId;
    type Create = ItemCreate;
    type Update = ItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = UserClient;
    type Error = ItemError;

    /// Creates a new Item from creation parameters.
    ///
    /// Tags are trimmed and empty tags dropped; the description must be
    /// non-blank and a price, if given, non-negative.
    fn from_create_params(id: ItemId, params: ItemCreate) -> Result<Self, Self::Error> {
        let draft = params.draft;
        Ok(Self {
            id,
            owner: params.owner,
            price: validate_price(draft.price)?,
            tags: normalize_tags(draft.tags),
            description: validate_description(&draft.description)?,
        })
    }

    async fn on_create(&mut self, users: &UserClient) -> Result<(), Self::Error> {
        match users.get(self.owner).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ItemError::UnknownOwner(self.owner.to_string())),
            Err(e) => Err(ItemError::ActorCommunicationError(e.to_string())),
        }
    }

    /// Handles updates to the Item entity.
    ///
    /// The whole patch is validated before any field changes, so a rejected
    /// update leaves the item untouched.
    async fn on_update(&mut self, update: ItemUpdate, _ctx: &UserClient) -> Result<(), Self::Error> {
        if update.caller != self.owner {
            return Err(ItemError::Forbidden(self.id.to_string()));
        }
        let patch = update.patch;
        let price = patch.price.map(validate_price).transpose()?;
        let description = patch
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;

        if let Some(price) = price {
            self.price = price;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(description) = description {
            self.description = description;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &UserClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
