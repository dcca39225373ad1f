//! Brevo (formerly Sendinblue) adapter: <https://developers.brevo.com/reference/sendtransacemail>.

use std::time::Duration;

use async_trait::async_trait;
use http::header::HeaderName;
use serde::Serialize;

use super::http::{HttpClient, JsonEndpoint};
use super::{BuildError, EmailSender};
use crate::email::EmailRequest;

pub const BREVO_URL: &str = "https://api.brevo.com/v3/smtp/email";

pub struct BrevoSender {
    client: HttpClient,
    endpoint: JsonEndpoint,
}

impl BrevoSender {
    pub fn new(
        client: HttpClient,
        token: &str,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, BuildError> {
        let endpoint = JsonEndpoint::new(
            "brevo",
            endpoint.unwrap_or(BREVO_URL),
            HeaderName::from_static("api-key"),
            token,
            timeout,
        )?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Debug, Serialize)]
struct BrevoContact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoContact<'a>,
    to: Vec<BrevoContact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

impl<'a> From<&'a EmailRequest> for BrevoPayload<'a> {
    fn from(email: &'a EmailRequest) -> Self {
        Self {
            sender: BrevoContact {
                name: Some(email.sender_name()),
                email: &email.from_email,
            },
            to: email
                .to
                .iter()
                .map(|addr| BrevoContact {
                    name: None,
                    email: addr,
                })
                .collect(),
            subject: &email.subject,
            html_content: &email.html,
            text_content: &email.text,
        }
    }
}

#[async_trait]
impl EmailSender for BrevoSender {
    fn name(&self) -> &'static str {
        "brevo"
    }

    async fn send(&self, email: &EmailRequest) -> bool {
        self.endpoint
            .post(&self.client, &BrevoPayload::from(email))
            .await
    }
}
