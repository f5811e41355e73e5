//! # Session Client
//!
//! Login, logout and token authentication. Holds a [`UserClient`] for the
//! credential check, the same way the session actor holds one for its
//! `on_create` hook.
use super::{entity_error, UserClient};
use crate::model::{digest_token, expiry_after, now_millis, Caller, Session, SessionCreate, SessionId};
use crate::session_actor::entity::{EXPIRES_AT, TOKEN_DIGEST};
use crate::session_actor::AuthError;
use crate::user_actor::UserError;
use async_trait::async_trait;
use bazaar_actor::query::{Filter, FindQuery, Page, Predicate};
use bazaar_actor::{ActorClient, FrameworkError, ResourceClient};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Session actor.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
    users: UserClient,
    ttl: Duration,
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Session>, users: UserClient, ttl: Duration) -> Self {
        Self { inner, users, ttl }
    }

    /// How long a session stays valid after login.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl ActorClient<Session> for SessionClient {
    type Error = AuthError;

    fn inner(&self) -> &ResourceClient<Session> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<AuthError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(_)) => AuthError::Unauthenticated,
            Err(other) => AuthError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl SessionClient {
    /// Verifies the credentials and opens a session.
    ///
    /// Returns the raw session token. It is not stored anywhere and cannot be
    /// recovered later.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user_id = self
            .users
            .verify_credentials(username, password)
            .await
            .map_err(|e| match e {
                UserError::InvalidCredentials => AuthError::InvalidCredentials,
                other => AuthError::ActorCommunicationError(other.to_string()),
            })?;

        let now = now_millis();
        self.sweep_expired(now).await?;

        let token = uuid::Uuid::new_v4().simple().to_string();
        let params = SessionCreate {
            token_digest: digest_token(&token),
            user_id,
            expires_at: expiry_after(now, self.ttl),
        };
        let session_id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%user_id, %session_id, "Session opened");
        Ok(token)
    }

    /// Removes every session that expired at or before `now`.
    async fn sweep_expired(&self, now: u64) -> Result<(), AuthError> {
        let filter = Filter::new().and(Predicate::range(EXPIRES_AT, None, Some(now as f64)));
        let expired = self.find(FindQuery::new(filter)).await?;
        if !expired.is_empty() {
            debug!(count = expired.len(), "Sweeping expired sessions");
        }
        for session in expired {
            self.close(session.id).await?;
        }
        Ok(())
    }

    async fn close(&self, id: SessionId) -> Result<(), AuthError> {
        match self.inner.delete(id).await {
            // closed concurrently
            Ok(()) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn lookup(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let filter = Filter::new().and(Predicate::eq(TOKEN_DIGEST, digest_token(token)));
        let found = self
            .find(FindQuery::new(filter).paged(Page::new(0, Some(1))))
            .await?;
        Ok(found.into_iter().next())
    }

    /// Resolves a session token to the caller it belongs to.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<Caller, AuthError> {
        debug!("Sending request");
        let session = self.lookup(token).await?.ok_or(AuthError::Unauthenticated)?;
        if session.is_expired(now_millis()) {
            warn!(session_id = %session.id, "Expired session presented");
            self.close(session.id).await?;
            return Err(AuthError::Unauthenticated);
        }
        Ok(Caller {
            user_id: session.user_id,
            session_id: session.id,
        })
    }

    /// Closes the session behind `token`, if there is one.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let Some(session) = self.lookup(token).await? else {
            debug!("No session to close");
            return Ok(());
        };
        self.close(session.id).await?;
        info!(session_id = %session.id, "Session closed");
        Ok(())
    }
}
