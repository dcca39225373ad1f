//! `mailswitch run`: start the HTTP server.
//!
//! Loads the providers list once (inline value or file), builds the
//! ordered sender list, then serves the Axum router until Ctrl+C or
//! SIGTERM. Malformed provider entries are logged and skipped; only an
//! unreadable source or missing credentials stop startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cli::RunArgs;
use crate::config;
use crate::dispatch::EmailSwitch;
use crate::error::MailSwitchError;
use crate::logging;
use crate::providers::http::build_http_client;
use crate::providers::registry::{self, SenderContext};
use crate::server::{self, AppState, LoadedProviders, Stats};
use crate::signature::SigningKeys;

pub async fn execute(args: RunArgs) -> Result<(), MailSwitchError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let root_api_key = required(args.root_api_key.as_deref(), "ROOT_API_KEY", "--root-api-key")?;
    let signing_keys = signing_keys(&args)?;

    let source =
        config::resolve_source(args.providers_value.as_deref(), &args.providers_file)?;
    let (raw, version) = source.load().await?;

    let ctx = SenderContext {
        http_client: build_http_client(),
        timeout: Duration::from_millis(args.timeout),
    };
    let parsed = registry::parse(&raw, &ctx);

    for error in &parsed.errors {
        tracing::warn!(
            index = error.index,
            id = error.id.as_deref().unwrap_or("-"),
            error = %error.message,
            suggestion = error.suggestion.as_deref().unwrap_or(""),
            "provider entry skipped"
        );
    }
    if parsed.senders.is_empty() {
        tracing::warn!(
            source = source.name(),
            "no usable providers configured, every dispatch will fail"
        );
    }

    let provider_names = parsed.names().join(",");
    let skipped = parsed.errors.len();

    let state = Arc::new(AppState {
        switch: EmailSwitch::new(parsed.senders),
        root_api_key,
        signing_keys,
        providers: LoadedProviders {
            source_name: source.name().to_string(),
            version,
            loaded_at: Instant::now(),
            skipped,
        },
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let qstash = state.signing_keys.is_some();
    let router = server::build_router(state, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        providers = %provider_names,
        skipped,
        qstash,
        timeout_ms = args.timeout,
        "mailswitch started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("mailswitch stopped");
    Ok(())
}

fn required(
    value: Option<&str>,
    name: &'static str,
    flag: &str,
) -> Result<String, MailSwitchError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MailSwitchError::MissingSetting {
            name,
            hint: format!("Set {name} in the environment or .env file, or pass {flag}."),
        }),
    }
}

fn signing_keys(args: &RunArgs) -> Result<Option<SigningKeys>, MailSwitchError> {
    if !args.qstash {
        return Ok(None);
    }
    let current = required(
        args.qstash_current_signing_key.as_deref(),
        "QSTASH_CURRENT_SIGNING_KEY",
        "--qstash-current-signing-key",
    )?;
    let next = required(
        args.qstash_next_signing_key.as_deref(),
        "QSTASH_NEXT_SIGNING_KEY",
        "--qstash-next-signing-key",
    )?;
    Ok(Some(SigningKeys::new(current, next, args.webhook_leeway)))
}
