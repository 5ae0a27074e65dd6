//! Router assembly
//!
//! The guarded subtree sits behind the admission middleware; `/health` and
//! `/metrics` stay outside it so probes and scrapes are never throttled.

use crate::middleware::{self, AppState};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;

/// Build the server's router around the shared state.
pub fn router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/", get(index))
        .layer(from_fn_with_state(state.clone(), middleware::limit));

    Router::new()
        .merge(guarded)
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics(State(state): State<AppState>) -> Response {
    match state.limiter.stats().await {
        Ok(stats) => state.metrics.export_prometheus(&stats).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to read limiter stats");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
