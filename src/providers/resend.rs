//! Resend adapter: <https://resend.com/docs/api-reference/emails/send-email>.

use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use serde::Serialize;

use super::http::{HttpClient, JsonEndpoint};
use super::{BuildError, EmailSender};
use crate::email::EmailRequest;

pub const RESEND_URL: &str = "https://api.resend.com/emails";

pub struct ResendSender {
    client: HttpClient,
    endpoint: JsonEndpoint,
}

impl ResendSender {
    pub fn new(
        client: HttpClient,
        token: &str,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, BuildError> {
        let endpoint = JsonEndpoint::new(
            "resend",
            endpoint.unwrap_or(RESEND_URL),
            AUTHORIZATION,
            &format!("Bearer {token}"),
            timeout,
        )?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Debug, Serialize)]
struct ResendPayload<'a> {
    from: String,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl<'a> From<&'a EmailRequest> for ResendPayload<'a> {
    fn from(email: &'a EmailRequest) -> Self {
        Self {
            from: email.sender_mailbox(),
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        }
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &EmailRequest) -> bool {
        self.endpoint
            .post(&self.client, &ResendPayload::from(email))
            .await
    }
}
