//! # Generic Messages
//!
//! Request types sent from a [`ResourceClient`](crate::ResourceClient) to a
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::query::{Bucket, Filter, FindQuery};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the standard resource lifecycle (Create, Get, Update,
/// Delete), a custom `Action` escape hatch, and three read-only queries over
/// the whole collection:
///
/// - **Find**: filter, stable sort, page. Answers in natural order when unsorted.
/// - **Count**: number of entities matching a filter.
/// - **GroupCount**: distinct values of one field with the number of entities
///   carrying each.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Find {
        query: FindQuery,
        respond_to: Response<Vec<T>>,
    },
    Count {
        filter: Filter,
        respond_to: Response<usize>,
    },
    GroupCount {
        field: String,
        respond_to: Response<Vec<Bucket>>,
    },
}
