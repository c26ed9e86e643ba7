pub mod webhook;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::SharedState;

/// Routes external-dns calls on the webhook listener.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(webhook::negotiate).post(webhook::apply_changes))
        .route(
            "/records",
            get(webhook::records).post(webhook::apply_changes),
        )
        .route("/adjustendpoints", post(webhook::adjust_endpoints))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

/// Liveness probe served on its own listener. Methods other than GET get 405.
pub fn health_router() -> Router {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz() -> &'static str {
    "OK"
}
