//! Admission middleware
//!
//! Wraps a downstream router: every request is identified by its client and
//! run through the shared token-bucket limiter before it reaches the inner
//! handler. Rejections carry the standard reason phrase as a plain-text body.
//!
//! # Client identification
//!
//! 1. The `X-Forwarded-For` header, used verbatim when non-empty. Header
//!    trust is assumed; deploy behind a proxy that controls it.
//! 2. Otherwise the peer address recorded at accept time, reduced to its
//!    host portion (correct for IPv6 literals).
//! 3. Neither present: the request is answered with `400 Bad Request`
//!    without touching the limiter.

use crate::actor::LimiterHandle;
use crate::metrics::Metrics;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Shared state for the middleware and the metrics endpoint
#[derive(Clone)]
pub struct AppState {
    pub limiter: LimiterHandle,
    pub metrics: Arc<Metrics>,
}

/// Intercept one request: identify the client, consult the limiter, and
/// forward or reject.
pub async fn limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(key) = client_key(&request) else {
        state.metrics.record_unidentified();
        return reject(StatusCode::BAD_REQUEST);
    };

    match state.limiter.check(&key, SystemTime::now()).await {
        Ok(true) => {
            state.metrics.record_allowed();
            next.run(request).await
        }
        Ok(false) => {
            state.metrics.record_denied();
            tracing::debug!(client = %key, "request throttled");
            reject(StatusCode::TOO_MANY_REQUESTS)
        }
        Err(err) => {
            state.metrics.record_error();
            tracing::error!(error = %err, "rate limiter unavailable");
            reject(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn reject(status: StatusCode) -> Response {
    let body = status.canonical_reason().unwrap_or_default();
    (status, body).into_response()
}

/// Extract the client identifier for a request.
///
/// Returns `None` when the request offers nothing to key a bucket on.
fn client_key(request: &Request) -> Option<String> {
    if let Some(forwarded) = request.headers().get(X_FORWARDED_FOR)
        && let Ok(value) = forwarded.to_str()
        && !value.is_empty()
    {
        return Some(value.to_string());
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
