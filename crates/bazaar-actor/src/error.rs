//! # Framework Errors
//!
//! Errors raised by the store and its client, independent of any entity.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicts with existing entity: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Projection failed: {0}")]
    Projection(#[from] serde_json::Error),
}
