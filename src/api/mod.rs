//! HTTP handlers that feed validated requests into the email switch.
//!
//! [`emails`] serves the bearer-authenticated `POST /api/emails`;
//! [`webhook`] serves the signature-verified `POST /qstash`. Both share
//! [`dispatch_body`], which maps parse and validation failures to `400`,
//! a delivered email to `200`, and exhausted providers to `500`.

pub mod emails;
pub mod webhook;

use std::sync::atomic::Ordering;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

use crate::email::EmailRequest;
use crate::server::AppState;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

pub async fn index() -> &'static str {
    "Email Switch"
}

/// Reuse the caller's correlation id, or mint a new one.
#[must_use]
pub fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from)
}

pub(crate) fn with_correlation_id(mut response: Response, correlation_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

pub(crate) fn reject(state: &AppState, message: &'static str) -> Response {
    state.stats.rejected.fetch_add(1, Ordering::Relaxed);
    (StatusCode::BAD_REQUEST, message).into_response()
}

pub(crate) async fn dispatch_body(state: &AppState, body: &[u8], correlation_id: &str) -> Response {
    let email = match serde_json::from_slice::<EmailRequest>(body) {
        Ok(email) if email.validate() => email,
        Ok(_) => {
            tracing::warn!(correlation_id = %correlation_id, "email request failed validation");
            return reject(state, "Body has wrong shape");
        }
        Err(e) => {
            tracing::warn!(
                correlation_id = %correlation_id,
                error = %e,
                "email request is not valid JSON"
            );
            return reject(state, "Body has wrong shape");
        }
    };

    tracing::info!(
        correlation_id = %correlation_id,
        recipients = email.to.len(),
        providers = state.switch.len(),
        "email received"
    );

    let span = tracing::info_span!("dispatch", correlation_id = %correlation_id);
    if state.switch.send(&email).instrument(span).await {
        state.stats.sent.fetch_add(1, Ordering::Relaxed);
        StatusCode::OK.into_response()
    } else {
        state.stats.failed.fetch_add(1, Ordering::Relaxed);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
