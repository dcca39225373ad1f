//! `POST /qstash`: signed webhook delivery path.
//!
//! The raw body is checked against the `Upstash-Signature` token before it
//! is parsed; a request that fails verification never reaches the switch.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::{correlation_id, dispatch_body, reject, with_correlation_id};
use crate::server::AppState;

pub const SIGNATURE_HEADER: &str = "upstash-signature";

pub async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = correlation_id(&headers);

    let Some(keys) = state.signing_keys.as_ref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if signature.is_empty() || !keys.verify(signature, &body) {
        tracing::warn!(
            correlation_id = %correlation_id,
            has_signature = !signature.is_empty(),
            "webhook signature verification failed"
        );
        return with_correlation_id(reject(&state, "Signature isn't legit"), &correlation_id);
    }

    let response = dispatch_body(&state, &body, &correlation_id).await;
    with_correlation_id(response, &correlation_id)
}
