//! SendGrid v3 mail-send adapter: <https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send>.

use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use serde::Serialize;

use super::http::{HttpClient, JsonEndpoint};
use super::{BuildError, EmailSender};
use crate::email::EmailRequest;

pub const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

pub struct SendGridSender {
    client: HttpClient,
    endpoint: JsonEndpoint,
}

impl SendGridSender {
    pub fn new(
        client: HttpClient,
        token: &str,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, BuildError> {
        let endpoint = JsonEndpoint::new(
            "sendgrid",
            endpoint.unwrap_or(SENDGRID_URL),
            AUTHORIZATION,
            &format!("Bearer {token}"),
            timeout,
        )?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Person<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Person<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SendGridPayload<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Person<'a>,
    reply_to: Person<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

impl<'a> From<&'a EmailRequest> for SendGridPayload<'a> {
    fn from(email: &'a EmailRequest) -> Self {
        let from = Person {
            email: &email.from_email,
            name: Some(email.sender_name()),
        };
        Self {
            personalizations: [Personalization {
                to: email
                    .to
                    .iter()
                    .map(|addr| Person {
                        email: addr,
                        name: None,
                    })
                    .collect(),
            }],
            from,
            reply_to: from,
            subject: &email.subject,
            content: [
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}

#[async_trait]
impl EmailSender for SendGridSender {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, email: &EmailRequest) -> bool {
        self.endpoint
            .post(&self.client, &SendGridPayload::from(email))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_has_personalizations_and_both_content_parts() {
        let email = EmailRequest {
            from_email: "news@acme.io".into(),
            from_name: None,
            to: vec!["a@x.com".into()],
            subject: "Hello".into(),
            text: String::new(),
            html: "<b>hi</b>".into(),
        };
        let value = serde_json::to_value(SendGridPayload::from(&email)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "personalizations": [{"to": [{"email": "a@x.com"}]}],
                "from": {"email": "news@acme.io", "name": "news@acme.io"},
                "reply_to": {"email": "news@acme.io", "name": "news@acme.io"},
                "subject": "Hello",
                "content": [
                    {"type": "text/plain", "value": ""},
                    {"type": "text/html", "value": "<b>hi</b>"},
                ],
            })
        );
    }
}
