//! ActorEntity trait implementation for the User domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`User`] to be managed by the generic [`bazaar_actor::ResourceActor`].
//!
//! Usernames are unique across the store (see `conflicts_with`). The password
//! digest is not a queryable field.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{PasswordDigest, User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use bazaar_actor::query::{Document, Value};
use bazaar_actor::ActorEntity;

fn validate_password(password: &str) -> Result<(), UserError> {
    if password.is_empty() {
        return Err(UserError::ValidationError("password must not be empty".into()));
    }
    Ok(())
}

impl Document for User {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::Number(f64::from(self.id.0))),
            "username" => Some(Value::Text(self.username.clone())),
            _ => None,
        }
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// The username is trimmed; it and the password must be non-empty.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let username = params.username.trim();
        if username.is_empty() {
            return Err(UserError::ValidationError("username must not be empty".into()));
        }
        validate_password(&params.password)?;
        Self::new(id, username, &params.password)
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.username == existing.username
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `password`: replaced with a freshly salted digest
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(password) = update.password {
            validate_password(&password)?;
            self.password = PasswordDigest::new(&password)?;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::VerifyPassword(candidate) => Ok(UserActionResult::VerifyPassword(
                self.verify_password(&candidate),
            )),
        }
    }
}
