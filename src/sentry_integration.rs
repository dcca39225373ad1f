//! Optional Sentry error tracking integration.
//!
//! Initializes the Sentry SDK with the provided DSN and environment.
//! The returned guard must be held for the lifetime of the application
//! so that panics and the WARN/ERROR events forwarded by the tracing
//! layer (e.g. every provider failing for a dispatch) are reported.

pub fn init(dsn: &str, environment: Option<&str>) -> sentry::ClientInitGuard {
    let parsed_dsn = match dsn.parse() {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(error = %e, "invalid Sentry DSN, error tracking disabled");
            None
        }
    };

    sentry::init(sentry::ClientOptions {
        dsn: parsed_dsn,
        environment: environment.map(|e| e.to_string().into()),
        release: Some(release().into()),
        // Request bodies carry recipient addresses and message content.
        send_default_pii: false,
        ..Default::default()
    })
}

fn release() -> String {
    format!(
        "mailswitch@{}+{}",
        env!("CARGO_PKG_VERSION"),
        env!("MAILSWITCH_GIT_SHORT")
    )
}
