//! # ActorEntity Trait
//!
//! The contract every stored resource (User, Item, Session, …) implements to be
//! managed by the generic [`ResourceActor`](crate::ResourceActor). Associated
//! types pin down the ID, the create/update payloads, custom actions, the
//! injected context and the error type, so a `User` store can never be handed
//! an `ItemDraft`.
//!
//! Every entity is also a [`Document`]: the actor answers `Find`, `Count` and
//! `GroupCount` requests by reading fields through that trait.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults accept everything.

use crate::query::Document;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[async_trait]
pub trait ActorEntity: Document + Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD (e.g. `VerifyPassword`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity, shared by all of its operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns true if `self` may not coexist with `existing` in the store
    /// (e.g. two users with the same username). Checked before `on_create`.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
