//! `mailswitch validate`: check a providers file without starting.
//!
//! Loads the file exactly as `run` would, builds every sender, and
//! reports the resulting failover order plus one diagnostic per entry
//! that `run` would skip. Any diagnostic makes the command fail.

use std::path::Path;
use std::time::Duration;

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::sources::file_source::FileSource;
use crate::config::{ConfigVersion, ProvidersSource};
use crate::error::MailSwitchError;
use crate::providers::http::build_http_client;
use crate::providers::registry::{self, ParsedProviders, SenderContext};

pub async fn execute(args: &ValidateArgs) -> Result<(), MailSwitchError> {
    let path = &args.config;
    let source = FileSource::from_path(path)?;
    let (raw, version) = source.load().await?;

    let ctx = SenderContext {
        http_client: build_http_client(),
        timeout: Duration::from_secs(10),
    };
    let parsed = registry::parse(&raw, &ctx);
    let names = parsed.names();

    match args.format {
        ValidateFormat::Text => print!("{}", text_report(path, &parsed, &version)),
        ValidateFormat::Json => {
            let skipped: Vec<serde_json::Value> = parsed
                .errors
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "index": e.index,
                        "id": e.id,
                        "message": e.message,
                        "suggestion": e.suggestion,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": parsed.errors.is_empty(),
                    "fingerprint": version.short(),
                    "providers": names,
                    "skipped": skipped,
                })
            );
        }
    }

    // The diagnostics themselves are printed once, by main, from the error.
    if parsed.errors.is_empty() {
        Ok(())
    } else {
        Err(MailSwitchError::ProviderConfig {
            errors: parsed.errors,
        })
    }
}

fn text_report(path: &Path, parsed: &ParsedProviders, version: &ConfigVersion) -> String {
    let names = parsed.names();
    let mut report = if parsed.errors.is_empty() {
        format!(
            "\u{2713} {} ({} providers, fingerprint {})\n",
            path.display(),
            names.len(),
            version.short()
        )
    } else {
        format!(
            "\u{2717} {} has {} unusable entries\n",
            path.display(),
            parsed.errors.len()
        )
    };
    if names.is_empty() {
        report.push_str("  no usable providers: every dispatch would fail\n");
    } else {
        report.push_str(&format!("  failover order: {}\n", names.join(" -> ")));
    }
    report
}
