//! Mapping of resource errors onto HTTP responses.

use crate::item_actor::ItemError;
use crate::session_actor::AuthError;
use crate::user_actor::UserError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Any error a handler can return. Rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The request body was not the JSON the handler expects.
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Item(e) => match e {
                ItemError::InvalidParameter(_)
                | ItemError::ValidationError(_)
                | ItemError::UnknownOwner(_) => StatusCode::BAD_REQUEST,
                ItemError::NotFound(_) => StatusCode::NOT_FOUND,
                ItemError::Forbidden(_) => StatusCode::FORBIDDEN,
                ItemError::Serialization(_) | ItemError::ActorCommunicationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::User(e) => match e {
                UserError::ValidationError(_) => StatusCode::BAD_REQUEST,
                UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                UserError::NotFound(_) => StatusCode::NOT_FOUND,
                UserError::AlreadyExists(_) => StatusCode::CONFLICT,
                UserError::Hashing(_) | UserError::ActorCommunicationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Auth(e) => match e {
                AuthError::Unauthenticated
                | AuthError::InvalidCredentials
                | AuthError::UnknownUser(_) => StatusCode::UNAUTHORIZED,
                AuthError::ActorCommunicationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
        }
    }

    // axum's rejection Display omits the serde detail that body_text carries
    fn message(&self) -> String {
        match self {
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Query(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.message()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
