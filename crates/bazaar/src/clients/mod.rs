//! # Resource Clients
//!
//! Typed wrappers around [`ResourceClient`](bazaar_actor::ResourceClient). Each
//! implements [`ActorClient`](bazaar_actor::ActorClient) for the shared
//! `get`/`delete`/`find` calls and adds the operations of its resource.

pub mod item_client;
pub mod session_client;
pub mod user_client;

pub use item_client::ItemClient;
pub use session_client::SessionClient;
pub use user_client::UserClient;

use bazaar_actor::FrameworkError;

/// Recovers the entity's own error from a framework error, if it carries one.
///
/// Entity hooks fail with their resource error; the actor boxes it into
/// [`FrameworkError::EntityError`] on the way back.
pub(crate) fn entity_error<E>(e: FrameworkError) -> Result<E, FrameworkError>
where
    E: std::error::Error + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => inner
            .downcast::<E>()
            .map(|err| *err)
            .map_err(FrameworkError::EntityError),
        other => Err(other),
    }
}
