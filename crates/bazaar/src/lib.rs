//! # Bazaar
//!
//! A marketplace backend: users list items with a price, tags and a
//! description, and browse each other's listings through a filterable,
//! sortable, pageable query API.
//!
//! - **[model]**: plain data ([`User`](model::User), [`Item`](model::Item), [`Session`](model::Session))
//! - **[user_actor]**, **[item_actor]**, **[session_actor]**: one
//!   [`ResourceActor`](bazaar_actor::ResourceActor) per resource
//! - **[clients]**: typed wrappers hiding the message passing
//! - **[query]**: request parameters to store queries
//! - **[http]**: the axum API
//! - **[lifecycle]**: starting and stopping the actors
//! - **[config]**: TOML / environment configuration

pub mod clients;
pub mod config;
pub mod http;
pub mod item_actor;
pub mod lifecycle;
pub mod model;
pub mod query;
pub mod session_actor;
pub mod user_actor;
