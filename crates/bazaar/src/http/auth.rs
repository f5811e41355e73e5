//! Session cookie extraction and the account endpoints.
//!
//! Every item endpoint takes a [`Caller`] argument. Extraction fails with 401
//! before any other argument (in particular the query string) is looked at.

use super::extract::ApiJson;
use super::{ApiError, AppState};
use crate::model::{Caller, UserCreate, UserId};
use crate::session_actor::AuthError;
use crate::user_actor::UserError;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bazaar_actor::ActorClient;
use serde::Serialize;
use tracing::debug;

pub const SESSION_COOKIE: &str = "session";

/// The `session` cookie's value, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Username and password from an `Authorization: Basic` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn session_cookie(token: &str, max_age: u64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}")
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            debug!("No session cookie");
            return Err(AuthError::Unauthenticated.into());
        };
        Ok(state.sessions.authenticate(token).await?)
    }
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
}

/// `POST /api/users`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<UserCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let username = params.username.trim().to_string();
    let id = state.users.register(params).await?;
    Ok((StatusCode::CREATED, Json(UserView { id, username })))
}

/// `GET /api/profile`: the signed-in user.
pub async fn profile(State(state): State<AppState>, caller: Caller) -> Result<Json<UserView>, ApiError> {
    let user = state
        .users
        .get(caller.user_id)
        .await?
        .ok_or_else(|| UserError::NotFound(caller.user_id.to_string()))?;
    Ok(Json(UserView {
        id: user.id,
        username: user.username,
    }))
}

/// `POST /api/auth/login` with HTTP Basic credentials.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    let (username, password) = basic_credentials(&headers).ok_or(AuthError::InvalidCredentials)?;
    let token = state.sessions.login(&username, &password).await?;
    let cookie = session_cookie(&token, state.sessions.ttl().as_secs());
    Ok((StatusCode::OK, [(SET_COOKIE, cookie)]))
}

/// `POST /api/auth/logout`. Succeeds with or without a live session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = session_token(&headers) {
        state.sessions.logout(token).await?;
    }
    let cleared = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0");
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cleared)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; session=abc123; lang=en"));
        assert_eq!(session_token(&headers), Some("abc123"));

        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_basic_credentials() {
        let mut headers = HeaderMap::new();
        let encoded = BASE64.encode("alice:pa:ss");
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Basic {encoded}")).unwrap());
        assert_eq!(
            basic_credentials(&headers),
            Some(("alice".to_string(), "pa:ss".to_string()))
        );

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(basic_credentials(&headers), None);
    }
}
