//! Error types for the Item actor.

use crate::query::InvalidParameter;
use thiserror::Error;

/// Errors that can occur during item operations and item queries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemError {
    /// The requested item was not found.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// The caller does not own the item.
    #[error("Not the owner of item {0}")]
    Forbidden(String),

    /// A listing/count query parameter could not be used.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    /// The owner named on a new item is not a registered user.
    #[error("Unknown owner: {0}")]
    UnknownOwner(String),

    /// The item data provided is invalid.
    #[error("Item validation error: {0}")]
    ValidationError(String),

    /// An item could not be turned into its JSON record.
    #[error("Item serialization error: {0}")]
    Serialization(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
