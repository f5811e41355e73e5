//! # Bazaar Actor
//!
//! Building blocks for resource stores that live inside actors. Each resource
//! type (users, items, sessions, …) gets one [`ResourceActor`] that owns its
//! collection in a Tokio task and serves a uniform API over a channel:
//!
//! - **CRUD**: create, get, update, delete
//! - **Actions**: resource-specific operations ([`ActorEntity::Action`])
//! - **Queries**: find (filter, stable sort, page), count, group-by-count
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`] + [`query::Document`]): business rules and
//!    field access for one resource type.
//! 2. **Runtime** ([`ResourceActor`]): message loop and the insertion-ordered store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! The [`query`] module describes reads independently of the store, so the
//! translation from an application's request parameters into a [`query::FindQuery`]
//! is a pure function that can be tested on its own.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`actor.run(context)`), not
//! when it is built. An item store can therefore validate owners against a
//! user client that was created alongside it:
//!
//! ```rust,ignore
//! let (user_actor, user_client) = ResourceActor::<User>::new(32);
//! let (item_actor, item_client) = ResourceActor::<Item>::new(32);
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(item_actor.run(UserClient::new(user_client.clone())));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and handles one message at a time
//! - No locks around entity state; different actors run in parallel
//! - Clients are cheap clones of a channel sender
//!
//! ## Testing
//!
//! See [`mock`] for `MockClient` and the channel helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
