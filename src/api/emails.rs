//! `POST /api/emails`: send one email through the provider chain.
//!
//! Authentication happens in [`require_bearer`](crate::middleware::auth::require_bearer)
//! before this handler runs.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use super::{correlation_id, dispatch_body, with_correlation_id};
use crate::server::AppState;

pub async fn send_email(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = correlation_id(&headers);
    let response = dispatch_body(&state, &body, &correlation_id).await;
    with_correlation_id(response, &correlation_id)
}
