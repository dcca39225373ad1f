//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, providers metadata (source, fingerprint, ordered
//! names), and cumulative dispatch statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub commit: String,
    pub uptime_seconds: u64,
    pub providers: ProvidersHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ProvidersHealth {
    pub source: String,
    pub fingerprint: String,
    pub loaded_ago_seconds: u64,
    pub count: usize,
    pub skipped: usize,
    pub names: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub sent: u64,
    pub failed: u64,
    pub rejected: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let providers = &state.providers;
    // An empty switch still answers, but every dispatch will fail.

    Json(HealthResponse {
        status: if state.switch.is_empty() {
            "degraded".to_string()
        } else {
            "healthy".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("MAILSWITCH_GIT_SHORT").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        providers: ProvidersHealth {
            source: providers.source_name.clone(),
            fingerprint: providers.version.short().to_string(),
            loaded_ago_seconds: providers.loaded_at.elapsed().as_secs(),
            count: state.switch.len(),
            skipped: providers.skipped,
            names: state
                .switch
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
        },
        stats: StatsResponse {
            sent: state.stats.sent.load(Ordering::Relaxed),
            failed: state.stats.failed.load(Ordering::Relaxed),
            rejected: state.stats.rejected.load(Ordering::Relaxed),
        },
    })
}
