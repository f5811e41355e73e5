//! # Item Actor
//!
//! Owns the item collection. Listing, counting and tag aggregation are served
//! by the store's generic `Find`, `Count` and `GroupCount` requests; see
//! [`crate::query`] for how request parameters become a
//! [`FindQuery`](bazaar_actor::query::FindQuery).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](bazaar_actor::ActorEntity) and
//!   [`Document`](bazaar_actor::query::Document) for [`Item`]
//! - [`error`] - [`ItemError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! `Context = UserClient`. Start the actor with a clone of the user client:
//!
//! ```rust,ignore
//! let (item_actor, item_client) = item_actor::new(32);
//! tokio::spawn(item_actor.run(user_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ItemClient;
use crate::model::Item;
use bazaar_actor::ResourceActor;

/// Creates a new Item actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Item>, ItemClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ItemClient::new(generic_client))
}
