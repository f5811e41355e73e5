//! Error types for authentication and the Session actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// No session, or a session token that is not (or no longer) valid.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A session was requested for a user that does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
