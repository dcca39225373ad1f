//! Structured logging setup using the `tracing` ecosystem.
//!
//! Configures a `tracing-subscriber` with either JSON output (for
//! production) or pretty-printed output (for TTY / local dev). Format
//! is auto-detected from the terminal but can be forced via `--json`
//! or `--pretty`.
//!
//! With the `sentry-integration` feature, WARN and ERROR events are also
//! forwarded to Sentry through `sentry-tracing`.

use tracing::Subscriber;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Level filter for our own spans; noisy transport crates stay at WARN
/// unless the level is TRACE.
#[must_use]
pub fn filter_for(level: &LogLevel) -> Targets {
    let tracing_level = level.to_tracing_level();
    let deps_level = if matches!(level, LogLevel::Trace) {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    Targets::new()
        .with_default(tracing_level)
        .with_target("hyper_util", deps_level)
        .with_target("rustls", deps_level)
        .with_target("lettre", deps_level)
}

/// Build the process subscriber: level filter, optional Sentry layer, and
/// the JSON or pretty formatter.
#[must_use]
pub fn subscriber(level: &LogLevel, format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let registry = tracing_subscriber::registry().with(filter_for(level));

    #[cfg(feature = "sentry-integration")]
    let registry = registry.with(sentry_tracing::layer());

    match format {
        LogFormat::Json => Box::new(registry.with(fmt::layer().json().with_target(false))),
        LogFormat::Pretty => Box::new(registry.with(fmt::layer().pretty())),
    }
}

pub fn init(level: &LogLevel, format: LogFormat) {
    subscriber(level, format).init();
}
