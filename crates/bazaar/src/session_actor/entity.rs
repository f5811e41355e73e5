//! ActorEntity trait implementation for the Session domain type.
//!
//! Sessions are looked up by token digest through a `Find` on the
//! `token_digest` field. Like items, the session actor runs with a
//! [`UserClient`] context and refuses sessions for unknown users.
//! `expires_at` is exposed so that expired sessions can be found by range.

use super::error::AuthError;
use crate::clients::UserClient;
use crate::model::{Session, SessionCreate, SessionId};
use crate::query::plan::id_value;
use async_trait::async_trait;
use bazaar_actor::query::{Document, Value};
use bazaar_actor::{ActorClient, ActorEntity};

pub const TOKEN_DIGEST: &str = "token_digest";
pub const USER_ID: &str = "user_id";
pub const EXPIRES_AT: &str = "expires_at";

impl Document for Session {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(id_value(self.id.0)),
            TOKEN_DIGEST => Some(Value::Text(self.token_digest.clone())),
            USER_ID => Some(id_value(self.user_id.0)),
            // u64 millis are exact in an f64 for any realistic date
            EXPIRES_AT => Some(Value::Number(self.expires_at as f64)),
            _ => None,
        }
    }
}

#[async_trait]
impl ActorEntity for Session {
    type Id = SessionId;
    type Create = SessionCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = UserClient;
    type Error = AuthError;

    fn from_create_params(id: SessionId, params: SessionCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            token_digest: params.token_digest,
            user_id: params.user_id,
            expires_at: params.expires_at,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.token_digest == existing.token_digest
    }

    async fn on_create(&mut self, users: &UserClient) -> Result<(), Self::Error> {
        match users.get(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(AuthError::UnknownUser(self.user_id.to_string())),
            Err(e) => Err(AuthError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &UserClient) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &UserClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
