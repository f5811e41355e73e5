//! # Session Actor
//!
//! Stores login sessions. A session is opened by a successful login and
//! closed by logout, or once it expires: an expired session is removed when
//! presented, and every login sweeps the rest. The HTTP layer resolves the
//! `session` cookie to a [`Caller`](crate::model::Caller) through
//! [`SessionClient::authenticate`](crate::clients::SessionClient::authenticate).
//!
//! Tokens are random UUIDs. The store keeps only their BLAKE3 digest.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{SessionClient, UserClient};
use crate::model::Session;
use bazaar_actor::ResourceActor;
use std::time::Duration;

/// Creates a new Session actor and its client. The client verifies
/// credentials against `users` when logging in and opens sessions lasting `ttl`.
pub fn new(buffer_size: usize, users: UserClient, ttl: Duration) -> (ResourceActor<Session>, SessionClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SessionClient::new(generic_client, users, ttl))
}
