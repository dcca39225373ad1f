//! `mailswitch health`: check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::MailSwitchError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), MailSwitchError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri =
        url.parse()
            .map_err(|e: hyper::http::uri::InvalidUri| MailSwitchError::UriParse {
                source: Box::new(e),
            })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| MailSwitchError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| MailSwitchError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| MailSwitchError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| MailSwitchError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(MailSwitchError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print_report(&args.url, &health),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn print_report(url: &str, health: &HealthResponse) {
    let mark = if health.status == "healthy" {
        "\u{2713}"
    } else {
        "!"
    };
    println!("{mark} mailswitch is {} ({url})", health.status);
    println!(
        "  version:      {} ({})",
        health.version, health.commit
    );
    println!("  uptime:       {}", format_uptime(health.uptime_seconds));
    println!(
        "  providers:    {} from {} (fingerprint {}, loaded {}s ago)",
        health.providers.count,
        health.providers.source,
        health.providers.fingerprint,
        health.providers.loaded_ago_seconds
    );
    if !health.providers.names.is_empty() {
        println!("  order:        {}", health.providers.names.join(" -> "));
    }
    if health.providers.skipped > 0 {
        println!("  skipped:      {} entries", health.providers.skipped);
    }
    println!(
        "  emails:       {} sent, {} failed, {} rejected",
        health.stats.sent, health.stats.failed, health.stats.rejected
    );
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }

    #[tokio::test]
    async fn invalid_url_is_a_uri_error() {
        let args = HealthArgs {
            url: "not a url".into(),
            json: true,
        };
        assert!(matches!(
            execute(args).await,
            Err(MailSwitchError::UriParse { .. })
        ));
    }
}
