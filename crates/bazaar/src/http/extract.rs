//! Body and query-string extractors whose rejections render as [`ApiError`].

use super::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// [`axum::Json`] with a `{"error": ..}` rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// [`axum::extract::Query`] with a `{"error": ..}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
