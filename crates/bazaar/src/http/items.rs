//! Item endpoints.
//!
//! Query strings are taken as raw pairs so that repeated names and unknown
//! parameters reach [`ItemQuery`](crate::query::ItemQuery) parsing unchanged.

use super::extract::{ApiJson, ApiQuery};
use super::{ApiError, AppState};
use crate::item_actor::ItemError;
use crate::model::{Caller, Item, ItemDraft, ItemId, ItemPatch, TagCount};
use crate::query::QueryParams;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bazaar_actor::query::Record;

type Pairs = ApiQuery<Vec<(String, String)>>;

// a malformed id cannot name an existing item
fn item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(ItemError::NotFound(raw.to_string())))
}

/// `GET /api/items`
pub async fn list_items(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pairs): Pairs,
) -> Result<Json<Vec<Record>>, ApiError> {
    let params = QueryParams::from_iter(pairs);
    Ok(Json(state.items.list_items(&caller, &params).await?))
}

/// `GET /api/items/count`
pub async fn count_items(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pairs): Pairs,
) -> Result<Json<usize>, ApiError> {
    let params = QueryParams::from_iter(pairs);
    Ok(Json(state.items.count_items(&caller, &params).await?))
}

/// `GET /api/items/tags`
pub async fn tag_frequency(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<TagCount>>, ApiError> {
    Ok(Json(state.items.tag_frequency(&caller).await?))
}

/// `GET /api/items/:id`
pub async fn get_item(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(&id)?;
    Ok(Json(state.items.get_item(&caller, id).await?))
}

/// `POST /api/items`
pub async fn create_item(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(draft): ApiJson<ItemDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.items.create_item(&caller, draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PATCH /api/items/:id`
pub async fn update_item(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ItemPatch>,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(&id)?;
    Ok(Json(state.items.update_item(&caller, id, patch).await?))
}

/// `DELETE /api/items/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(&id)?;
    state.items.delete_item(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/profile/items`
pub async fn list_own_items(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pairs): Pairs,
) -> Result<Json<Vec<Record>>, ApiError> {
    let params = QueryParams::from_iter(pairs);
    Ok(Json(state.items.list_own_items(&caller, &params).await?))
}
