//! Bearer-token guard for the `/api` routes.
//!
//! The `Authorization` header must be exactly `Bearer <ROOT_API_KEY>`:
//! two space-separated parts, compared in constant time. Anything else is
//! answered with `401 Unauthorized` before the handler runs.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::server::AppState;
use crate::signature::constant_time_eq;

/// Token part of a `Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| {
            constant_time_eq(token.as_bytes(), state.root_api_key.as_bytes())
        });

    if authorized {
        next.run(request).await
    } else {
        state.stats.rejected.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(path = %request.uri().path(), "rejected unauthorized request");
        StatusCode::UNAUTHORIZED.into_response()
    }
}
