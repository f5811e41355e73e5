//! # Generic Actor Server
//!
//! `ResourceActor` owns one entity collection and processes requests for it
//! sequentially inside a single Tokio task.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::query;
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the "server" half: it owns the `store` and the receiver end of the
/// channel. Requests are handled one at a time, so the store needs no lock and
/// every query sees a consistent snapshot.
///
/// The store is insertion-ordered. That order is the collection's *natural
/// order*: unsorted `Find` results follow it, sorted results fall back to it
/// for ties, and deleting an entity leaves the relative order of the rest
/// untouched.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use bazaar_actor::query::{Document, Filter, FindQuery, Predicate, Value};
/// use bazaar_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// impl Document for Note {
///     fn field(&self, name: &str) -> Option<Value> {
///         (name == "text").then(|| Value::Text(self.text.clone()))
///     }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32; type Create = NoteCreate; type Update = NoteUpdate;
///     type Action = NoteAction; type ActionResult = (); type Context = (); type Error = NoteError;
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.create(NoteCreate("buy milk".into())).await.unwrap();
///     client.create(NoteCreate("sell bike".into())).await.unwrap();
///
///     let filter = Filter::new().and(Predicate::contains("text", "BIKE"));
///     let found = client.find(FindQuery::new(filter)).await.unwrap();
///     assert_eq!(found.len(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Item" instead of "bazaar::model::item::Item")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };

                    if let Some((existing, _)) =
                        self.store.iter().find(|(_, e)| item.conflicts_with(e))
                    {
                        warn!(entity_type, %existing, "Create conflicts with existing entity");
                        let _ = respond_to
                            .send(Err(FrameworkError::Conflict(existing.to_string())));
                        continue;
                    }

                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    // IDs are only consumed by successful creates
                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        // shift_remove keeps the natural order of the remaining entities
                        self.store.shift_remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Find { query, respond_to } => {
                    let found = query.run(self.store.values());
                    debug!(entity_type, ?query, matched = found.len(), "Find");
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::Count { filter, respond_to } => {
                    let count = query::count(&filter, self.store.values());
                    debug!(entity_type, ?filter, count, "Count");
                    let _ = respond_to.send(Ok(count));
                }
                ResourceRequest::GroupCount { field, respond_to } => {
                    let buckets = query::group_count(self.store.values(), &field);
                    debug!(entity_type, %field, groups = buckets.len(), "GroupCount");
                    let _ = respond_to.send(Ok(buckets));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
