//! # HTTP API
//!
//! An axum [`Router`] over the resource clients. All routes live under
//! `/api`; every item route requires a `session` cookie obtained from
//! `POST /api/auth/login`.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/items` | [`items::list_items`] |
//! | `POST /api/items` | [`items::create_item`] |
//! | `GET /api/items/count` | [`items::count_items`] |
//! | `GET /api/items/tags` | [`items::tag_frequency`] |
//! | `GET/PATCH/DELETE /api/items/:id` | [`items::get_item`], [`items::update_item`], [`items::delete_item`] |
//! | `GET /api/profile` | [`auth::profile`] |
//! | `GET /api/profile/items` | [`items::list_own_items`] |
//! | `POST /api/users` | [`auth::register`] |
//! | `POST /api/auth/login` | [`auth::login`] |
//! | `POST /api/auth/logout` | [`auth::logout`] |

pub mod auth;
pub mod error;
pub mod extract;
pub mod items;

pub use error::ApiError;

use crate::clients::{ItemClient, SessionClient, UserClient};
use crate::lifecycle::MarketSystem;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Handler state: one clone of each resource client.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub items: ItemClient,
    pub sessions: SessionClient,
}

impl AppState {
    pub fn new(system: &MarketSystem) -> Self {
        Self {
            users: system.user_client.clone(),
            items: system.item_client.clone(),
            sessions: system.session_client.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route("/api/items/count", get(items::count_items))
        .route("/api/items/tags", get(items::tag_frequency))
        .route(
            "/api/items/:id",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/api/profile", get(auth::profile))
        .route("/api/profile/items", get(items::list_own_items))
        .route("/api/users", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
