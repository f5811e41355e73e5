use crate::model::UserId;
use crate::user_actor::UserError;
use serde::Deserialize;
use std::fmt;

/// Represents a registered user in the system.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](bazaar_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](bazaar_actor::ResourceActor).
///
/// See [`impl ActorEntity for User`](#impl-ActorEntity-for-User) for details on:
/// - Creation parameters ([`UserCreate`])
/// - Update parameters ([`UserUpdate`])
/// - Custom actions ([`UserAction`](crate::user_actor::UserAction))
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub(crate) password: PasswordDigest,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, password: &str) -> Result<Self, UserError> {
        Ok(Self {
            id,
            username: username.into(),
            password: PasswordDigest::new(password)?,
        })
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }
}

/// bcrypt cost factor for stored passwords.
pub const PASSWORD_COST: u32 = 10;

/// bcrypt hash of a password, salt included. The plain password is never stored.
#[derive(Clone, PartialEq)]
pub(crate) struct PasswordDigest(String);

impl PasswordDigest {
    pub(crate) fn new(password: &str) -> Result<Self, UserError> {
        bcrypt::hash(password, PASSWORD_COST)
            .map(Self)
            .map_err(|e| UserError::Hashing(e.to_string()))
    }

    pub(crate) fn verify(&self, candidate: &str) -> bool {
        // a malformed stored hash verifies nothing
        bcrypt::verify(candidate, &self.0).unwrap_or(false)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Payload for registering a new user.
#[derive(Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for changing a user's password.
#[derive(Clone)]
pub struct UserUpdate {
    pub password: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
