//! Shared HTTPS client and JSON POST exchange for the hosted-API adapters.
//!
//! [`build_http_client`] creates the connection-pooled hyper client once at
//! startup. [`JsonEndpoint`] holds one vendor's URL and auth header and
//! performs the bounded POST, reducing every outcome to a boolean.

use std::time::{Duration, Instant};

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{Method, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;

use super::BuildError;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, Full<Bytes>>;

/// Longest slice of a rejection body copied into the log.
const MAX_LOGGED_BODY: usize = 512;

/// Install `ring` as the process-wide rustls provider.
///
/// rustls cannot pick a provider on its own when more than one is compiled
/// in. Safe to call repeatedly: later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[must_use]
pub fn build_http_client() -> HttpClient {
    install_crypto_provider();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

#[derive(Debug, Clone)]
pub struct JsonEndpoint {
    provider: &'static str,
    uri: Uri,
    auth_header: HeaderName,
    auth_value: HeaderValue,
    timeout: Duration,
}

impl JsonEndpoint {
    pub fn new(
        provider: &'static str,
        url: &str,
        auth_header: HeaderName,
        auth_value: &str,
        timeout: Duration,
    ) -> Result<Self, BuildError> {
        let uri = url.parse::<Uri>().map_err(|source| BuildError::Endpoint {
            url: url.to_string(),
            source,
        })?;
        let mut auth_value = HeaderValue::from_str(auth_value)?;
        auth_value.set_sensitive(true);
        Ok(Self {
            provider,
            uri,
            auth_header,
            auth_value,
            timeout,
        })
    }

    /// POST `payload` as JSON. `true` only for a 2xx answer within the timeout.
    pub async fn post<T: Serialize + Sync>(&self, client: &HttpClient, payload: &T) -> bool {
        let body = match serde_json::to_vec(payload) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(provider = self.provider, error = %e, "failed to encode payload");
                return false;
            }
        };

        let req = match hyper::Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(self.auth_header.clone(), self.auth_value.clone())
            .body(Full::new(Bytes::from(body)))
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(provider = self.provider, error = %e, "failed to build request");
                return false;
            }
        };

        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, client.request(req)).await;
        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(response)) => {
                let status = response.status();
                if status.is_success() {
                    tracing::debug!(
                        provider = self.provider,
                        status = status.as_u16(),
                        latency_ms,
                        "provider accepted email"
                    );
                    return true;
                }
                let detail =
                    match tokio::time::timeout(self.timeout, response.into_body().collect()).await {
                        Ok(Ok(collected)) => {
                            let bytes = collected.to_bytes();
                            String::from_utf8_lossy(&bytes)
                                .chars()
                                .take(MAX_LOGGED_BODY)
                                .collect()
                        }
                        _ => String::new(),
                    };
                tracing::warn!(
                    provider = self.provider,
                    status = status.as_u16(),
                    latency_ms,
                    body = %detail,
                    "provider rejected email"
                );
                false
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = self.provider,
                    error = %e,
                    latency_ms,
                    "provider request failed"
                );
                false
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.provider,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "provider request timed out"
                );
                false
            }
        }
    }
}
