//! Custom actions for the User actor.
//!
//! Password checks run inside the actor so the digest never leaves it.
//! These actions are handled by
//! [`ActorEntity::handle_action`](bazaar_actor::ActorEntity::handle_action).

use std::fmt;

/// Custom actions for User entities.
#[derive(Clone)]
pub enum UserAction {
    /// Checks a candidate password against the stored digest.
    VerifyPassword(String),
}

impl fmt::Debug for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::VerifyPassword(_) => f.write_str("VerifyPassword(<redacted>)"),
        }
    }
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// Whether the password matched.
    VerifyPassword(bool),
}
