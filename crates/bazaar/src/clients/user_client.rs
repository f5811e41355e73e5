//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes domain‑specific methods.
use super::entity_error;
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use bazaar_actor::query::{Filter, FindQuery, Page, Predicate};
use bazaar_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument, warn};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<UserError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(FrameworkError::Conflict(id)) => UserError::AlreadyExists(id),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl UserClient {
    /// Registers a new user. Fails with `AlreadyExists` if the username is
    /// taken.
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        let username = params.username.trim().to_string();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => UserError::AlreadyExists(username),
            other => Self::map_error(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let query = FindQuery::new(Filter::new().and(Predicate::eq("username", username.trim())))
            .paged(Page::new(0, Some(1)));
        let found = self.find(query).await?;
        Ok(found.into_iter().next())
    }

    /// Checks a username/password pair and returns the user's ID.
    ///
    /// The password is compared inside the user actor. An unknown username
    /// and a wrong password fail the same way.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<UserId, UserError> {
        let Some(user) = self.find_by_username(username).await? else {
            warn!("Unknown username");
            return Err(UserError::InvalidCredentials);
        };

        let action = UserAction::VerifyPassword(password.to_string());
        match self.inner.perform_action(user.id, action).await {
            Ok(UserActionResult::VerifyPassword(true)) => Ok(user.id),
            Ok(UserActionResult::VerifyPassword(false)) => {
                warn!(user_id = %user.id, "Wrong password");
                Err(UserError::InvalidCredentials)
            }
            // deleted between the lookup and the check
            Err(FrameworkError::NotFound(_)) => Err(UserError::InvalidCredentials),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
