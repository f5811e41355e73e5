//! # Generic Client
//!
//! The sending half of a [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::query::{Bucket, Filter, FindQuery};
use tokio::sync::{mpsc, oneshot};

/// A type-safe, async handle to a `ResourceActor<T>`.
///
/// Holds only the channel sender, so clones are cheap and can be shared
/// across tasks. Each call sends one request and awaits its oneshot reply.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Filter, sort and page the collection.
    pub async fn find(&self, query: FindQuery) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Find { query, respond_to })
            .await
    }

    pub async fn count(&self, filter: Filter) -> Result<usize, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Count { filter, respond_to })
            .await
    }

    /// Distinct values of `field` with the number of entities carrying each.
    pub async fn group_count(&self, field: impl Into<String>) -> Result<Vec<Bucket>, FrameworkError> {
        let field = field.into();
        self.call(|respond_to| ResourceRequest::GroupCount { field, respond_to })
            .await
    }
}
