//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the resource actors.
//!
//! ## Wiring
//!
//! Actors are created first and get their dependencies when they start
//! (`actor.run(context)`), so construction order never matters:
//!
//! | Actor | Context |
//! |---|---|
//! | User | `()` |
//! | Item | `UserClient` (owner check on create) |
//! | Session | `UserClient` (user check on create) |
//!
//! The dependency graph is acyclic, so dropping every client is enough to
//! stop the system: each actor's `recv()` returns `None`, it logs its final
//! size and exits. The user actor is last to go, once the item and session
//! actors have released their context clones. [`MarketSystem::shutdown`]
//! performs the drop and awaits every task.
//!
//! ## Observability
//!
//! Tracing is set up by the binary with
//! [`setup_tracing`](bazaar_actor::tracing::setup_tracing) before the system
//! starts; actors log with an `entity_type` field.

pub mod market_system;

pub use market_system::*;
