//! # User Actor
//!
//! Manages registered users: registration, password changes and credential
//! checks.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](bazaar_actor::ActorEntity) implementation for [`User`]
//! - [`actions`] - [`UserAction`] (password verification)
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use bazaar::user_actor;
//! use bazaar::model::UserCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32);
//!
//!     // No dependencies, so context is ()
//!     tokio::spawn(actor.run(()));
//!
//!     let params = UserCreate {
//!         username: "alice".to_string(),
//!         password: "correct horse".to_string(),
//!     };
//!     let id = client.register(params).await?;
//!     assert_eq!(client.verify_credentials("alice", "correct horse").await?, id);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use bazaar_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
