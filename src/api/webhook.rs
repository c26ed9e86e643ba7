// src/api/webhook.rs
use axum::{
    Extension, Json,
    body::Bytes,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::SharedState;
use crate::endpoint::{MEDIA_TYPE, decode_changes, decode_endpoints};
use crate::error::Error;

/// JSON body tagged with the webhook media type.
fn webhook_json<T: Serialize>(value: &T) -> Response {
    ([(header::CONTENT_TYPE, MEDIA_TYPE)], Json(value)).into_response()
}

// GET /
pub async fn negotiate(Extension(state): Extension<SharedState>) -> Response {
    webhook_json(state.provider.domain_filter())
}

// GET /records
pub async fn records(Extension(state): Extension<SharedState>) -> Result<Response, Error> {
    let endpoints = state.provider.records().await?;
    Ok(webhook_json(&endpoints))
}

// POST /records and POST /
pub async fn apply_changes(
    Extension(state): Extension<SharedState>,
    body: Bytes,
) -> Result<StatusCode, Error> {
    let changes = decode_changes(&body)?;
    state.provider.apply_changes(&changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /adjustendpoints
pub async fn adjust_endpoints(
    Extension(state): Extension<SharedState>,
    body: Bytes,
) -> Result<Response, Error> {
    let endpoints = decode_endpoints(&body)?;
    Ok(webhook_json(&state.provider.adjust_endpoints(endpoints)))
}
