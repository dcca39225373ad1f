//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared context holding the email
//! switch, credentials, providers metadata, stats, and uptime),
//! [`build_router`] for constructing the Axum router with middleware
//! layers, and [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ConfigVersion;
use crate::dispatch::EmailSwitch;
use crate::health::health_handler;
use crate::middleware::auth::require_bearer;
use crate::signature::SigningKeys;

#[derive(Debug)]
pub struct LoadedProviders {
    pub source_name: String,
    pub version: ConfigVersion,
    pub loaded_at: Instant,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Stats {
    pub sent: AtomicU64,
    pub failed: AtomicU64,
    pub rejected: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sent: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }
}

pub struct AppState {
    pub switch: EmailSwitch,
    pub root_api_key: String,
    /// `Some` only when the signed webhook route is enabled.
    pub signing_keys: Option<SigningKeys>,
    pub providers: LoadedProviders,
    pub start_time: Instant,
    pub stats: Stats,
}

pub fn build_router(state: Arc<AppState>, max_body: usize) -> Router {
    let api = Router::new()
        .route("/emails", post(api::emails::send_email))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_bearer,
        ));

    let mut router = Router::new()
        .route("/", get(api::index))
        .route("/health", get(health_handler))
        .nest("/api", api);

    if state.signing_keys.is_some() {
        router = router.route("/qstash", post(api::webhook::receive));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
