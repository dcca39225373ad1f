//! Integration tests for the provider adapters against local mocks.
//!
//! Hosted-API tests spawn an axum server on an ephemeral port that records
//! the request it receives and answers with a fixed status, then point an
//! adapter at it through the `endpoint` override. SMTP tests talk to a
//! minimal plaintext SMTP server that records the dialogue.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use mailswitch::config::model::SmtpConfig;
use mailswitch::dispatch::EmailSwitch;
use mailswitch::email::EmailRequest;
use mailswitch::providers::brevo::BrevoSender;
use mailswitch::providers::http::build_http_client;
use mailswitch::providers::registry::{self, SenderContext};
use mailswitch::providers::resend::ResendSender;
use mailswitch::providers::sendgrid::SendGridSender;
use mailswitch::providers::smtp::SmtpSender;
use mailswitch::providers::EmailSender;

#[derive(Default)]
struct Recorded {
    headers: Option<HeaderMap>,
    body: Option<Value>,
    hits: usize,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    delay: Duration,
    recorded: Arc<Mutex<Recorded>>,
}

async fn record(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.hits += 1;
        recorded.headers = Some(headers);
        recorded.body = serde_json::from_slice(&body).ok();
    }
    tokio::time::sleep(state.delay).await;
    (state.status, r#"{"message":"mock"}"#)
}

async fn start_mock(status: StatusCode, delay: Duration) -> (String, Arc<Mutex<Recorded>>) {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = MockState {
        status,
        delay,
        recorded: Arc::clone(&recorded),
    };
    let router = Router::new().route("/send", post(record)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/send"), recorded)
}

fn email() -> EmailRequest {
    EmailRequest {
        from_email: "noreply@example.com".into(),
        from_name: Some("Example".into()),
        to: vec!["a@example.org".into(), "b@example.org".into()],
        subject: "Welcome".into(),
        text: "Hello".into(),
        html: "<p>Hello</p>".into(),
    }
}

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn resend_posts_bearer_json() {
    let (url, recorded) = start_mock(StatusCode::OK, Duration::ZERO).await;
    let sender = ResendSender::new(build_http_client(), "re_token", Some(&url), TIMEOUT).unwrap();

    assert!(sender.send(&email()).await);

    let recorded = recorded.lock().unwrap();
    let headers = recorded.headers.as_ref().unwrap();
    assert_eq!(headers["authorization"], "Bearer re_token");
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(
        recorded.body.as_ref().unwrap(),
        &json!({
            "from": "Example <noreply@example.com>",
            "to": ["a@example.org", "b@example.org"],
            "subject": "Welcome",
            "text": "Hello",
            "html": "<p>Hello</p>"
        })
    );
}

#[tokio::test]
async fn brevo_posts_api_key_header() {
    let (url, recorded) = start_mock(StatusCode::CREATED, Duration::ZERO).await;
    let sender = BrevoSender::new(build_http_client(), "xkeysib", Some(&url), TIMEOUT).unwrap();

    assert!(sender.send(&email()).await);

    let recorded = recorded.lock().unwrap();
    let headers = recorded.headers.as_ref().unwrap();
    assert_eq!(headers["api-key"], "xkeysib");
    assert!(headers.get("authorization").is_none());
    let body = recorded.body.as_ref().unwrap();
    assert_eq!(body["sender"], json!({"name": "Example", "email": "noreply@example.com"}));
    assert_eq!(body["to"], json!([{"email": "a@example.org"}, {"email": "b@example.org"}]));
    assert_eq!(body["htmlContent"], "<p>Hello</p>");
    assert_eq!(body["textContent"], "Hello");
}

#[tokio::test]
async fn sendgrid_posts_personalizations() {
    let (url, recorded) = start_mock(StatusCode::ACCEPTED, Duration::ZERO).await;
    let sender = SendGridSender::new(build_http_client(), "SG.key", Some(&url), TIMEOUT).unwrap();

    let mut text_only = email();
    text_only.html = String::new();
    assert!(sender.send(&text_only).await);

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.headers.as_ref().unwrap()["authorization"], "Bearer SG.key");
    let body = recorded.body.as_ref().unwrap();
    assert_eq!(body["personalizations"][0]["to"][1]["email"], "b@example.org");
    assert_eq!(body["from"], body["reply_to"]);
    assert_eq!(
        body["content"],
        json!([
            {"type": "text/plain", "value": "Hello"},
            {"type": "text/html", "value": ""}
        ])
    );
}

#[tokio::test]
async fn non_success_status_is_failure() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::UNAUTHORIZED,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let (url, recorded) = start_mock(status, Duration::ZERO).await;
        let sender = ResendSender::new(build_http_client(), "t", Some(&url), TIMEOUT).unwrap();
        assert!(!sender.send(&email()).await, "status {status}");
        assert_eq!(recorded.lock().unwrap().hits, 1);
    }
}

#[tokio::test]
async fn slow_provider_times_out() {
    let (url, _) = start_mock(StatusCode::OK, Duration::from_secs(5)).await;
    let sender =
        BrevoSender::new(build_http_client(), "t", Some(&url), Duration::from_millis(200)).unwrap();

    let start = std::time::Instant::now();
    assert!(!sender.send(&email()).await);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn configured_chain_fails_over_to_next_mock() {
    let (down, down_recorded) = start_mock(StatusCode::SERVICE_UNAVAILABLE, Duration::ZERO).await;
    let (up, up_recorded) = start_mock(StatusCode::OK, Duration::ZERO).await;
    let (unused, unused_recorded) = start_mock(StatusCode::OK, Duration::ZERO).await;

    let entries = vec![
        json!({"id": "sendgrid", "token": "a", "endpoint": down}),
        json!({"id": "resend", "token": "b", "endpoint": up}),
        json!({"id": "brevo", "token": "c", "endpoint": unused}),
    ];
    let ctx = SenderContext {
        http_client: build_http_client(),
        timeout: TIMEOUT,
    };
    let parsed = registry::parse(&entries, &ctx);
    assert!(parsed.errors.is_empty());

    let switch = EmailSwitch::new(parsed.senders);
    assert!(switch.send(&email()).await);

    assert_eq!(down_recorded.lock().unwrap().hits, 1);
    assert_eq!(up_recorded.lock().unwrap().hits, 1);
    assert_eq!(unused_recorded.lock().unwrap().hits, 0);
}

#[derive(Default)]
struct SmtpTranscript {
    commands: Vec<String>,
    data: Vec<String>,
}

async fn serve_smtp(
    stream: TcpStream,
    transcript: Arc<Mutex<SmtpTranscript>>,
    reject_rcpt: bool,
) -> std::io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    write.write_all(b"220 mock ESMTP\r\n").await?;

    let mut in_data = false;
    while let Some(line) = lines.next_line().await? {
        if in_data {
            if line == "." {
                in_data = false;
                write.write_all(b"250 2.0.0 queued\r\n").await?;
            } else {
                transcript.lock().unwrap().data.push(line);
            }
            continue;
        }

        let verb = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        transcript.lock().unwrap().commands.push(line);
        let reply = match verb.as_str() {
            "EHLO" => "250-mock\r\n250 AUTH PLAIN\r\n",
            "AUTH" => "235 2.7.0 accepted\r\n",
            "RCPT" if reject_rcpt => "550 5.1.1 no such mailbox\r\n",
            "DATA" => {
                in_data = true;
                "354 end with <CRLF>.<CRLF>\r\n"
            }
            "QUIT" => {
                write.write_all(b"221 bye\r\n").await?;
                return Ok(());
            }
            _ => "250 ok\r\n",
        };
        write.write_all(reply.as_bytes()).await?;
    }
    Ok(())
}

async fn start_smtp_mock(reject_rcpt: bool) -> (SmtpConfig, Arc<Mutex<SmtpTranscript>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let transcript = Arc::new(Mutex::new(SmtpTranscript::default()));

    let recorded = Arc::clone(&transcript);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_smtp(stream, Arc::clone(&recorded), reject_rcpt));
        }
    });

    let config = SmtpConfig {
        host: "127.0.0.1".into(),
        port,
        user: "u".into(),
        password: "p".into(),
    };
    (config, transcript)
}

#[tokio::test]
async fn smtp_sends_html_body_in_envelope() {
    let (config, transcript) = start_smtp_mock(false).await;
    let sender = SmtpSender::new(&config, TIMEOUT).unwrap();

    assert!(sender.send(&email()).await);

    let transcript = transcript.lock().unwrap();
    let commands = &transcript.commands;
    assert!(commands[0].starts_with("EHLO "));
    assert!(commands.iter().any(|c| c == "AUTH PLAIN AHUAcA=="), "{commands:?}");
    let mail_at = commands
        .iter()
        .position(|c| c == "MAIL FROM:<noreply@example.com>")
        .unwrap();
    assert_eq!(commands[mail_at + 1], "RCPT TO:<a@example.org>");
    assert_eq!(commands[mail_at + 2], "RCPT TO:<b@example.org>");
    assert_eq!(commands[mail_at + 3], "DATA");

    assert_eq!(transcript.data, vec!["<p>Hello</p>".to_string()]);
    assert!(!transcript.data.iter().any(|l| l.contains("Subject:")));
    assert!(!transcript.data.iter().any(|l| l.contains("Welcome")));
}

#[tokio::test]
async fn smtp_falls_back_to_text_body() {
    let (config, transcript) = start_smtp_mock(false).await;
    let sender = SmtpSender::new(&config, TIMEOUT).unwrap();

    let mut text_only = email();
    text_only.html = String::new();
    assert!(sender.send(&text_only).await);

    assert_eq!(transcript.lock().unwrap().data, vec!["Hello".to_string()]);
}

#[tokio::test]
async fn smtp_rejected_recipient_is_failure() {
    let (config, transcript) = start_smtp_mock(true).await;
    let sender = SmtpSender::new(&config, TIMEOUT).unwrap();

    assert!(!sender.send(&email()).await);

    let transcript = transcript.lock().unwrap();
    assert!(transcript.commands.iter().all(|c| c != "DATA"));
    assert!(transcript.data.is_empty());
}
