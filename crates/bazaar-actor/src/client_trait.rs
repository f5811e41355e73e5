//! # ActorClient Trait
//!
//! Common interface for resource-specific clients. Wrappers provide access to
//! their inner [`ResourceClient`] and an error mapping; `get`, `delete` and
//! `find` come for free.
use crate::query::FindQuery;
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// # Example
///
/// ```rust
/// use bazaar_actor::query::{Document, Value};
/// use bazaar_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32 }
/// #[derive(Debug)] struct TagCreate;
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] enum TagAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// impl Document for Tag {
///     fn field(&self, _: &str) -> Option<Value> { None }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32; type Create = TagCreate; type Update = TagUpdate;
///     type Action = TagAction; type ActionResult = (); type Context = (); type Error = TagError;
///     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: TagAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct TagClient {
///     inner: ResourceClient<Tag>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn inner(&self) -> &ResourceClient<Tag> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TagError(e.to_string())
///     }
/// }
///
/// async fn usage(client: TagClient) {
///     // get() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Run a find query against the collection.
    #[tracing::instrument(skip(self))]
    async fn find(&self, query: FindQuery) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(query).await.map_err(Self::map_error)
    }
}
