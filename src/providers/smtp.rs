//! Raw SMTP adapter built on `lettre`'s async transport.
//!
//! The message is sent as-is: the body is `html` when present, otherwise
//! `text`, with no MIME headers and no subject line. Sender and recipients
//! travel only in the SMTP envelope.

use std::time::Duration;

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{BuildError, EmailSender};
use crate::config::model::SmtpConfig;
use crate::email::EmailRequest;

pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpSender {
    pub fn new(config: &SmtpConfig, timeout: Duration) -> Result<Self, BuildError> {
        super::http::install_crypto_provider();

        let tls = TlsParameters::new(config.host.clone())?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            host: config.host.clone(),
            port: config.port,
        })
    }
}

fn envelope(email: &EmailRequest) -> Result<Envelope, Box<dyn std::error::Error + Send + Sync>> {
    let from = email.from_email.parse::<Address>()?;
    let to = email
        .to
        .iter()
        .map(|addr| addr.parse::<Address>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Envelope::new(Some(from), to)?)
}

#[async_trait]
impl EmailSender for SmtpSender {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, email: &EmailRequest) -> bool {
        let envelope = match envelope(email) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(provider = "smtp", error = %e, "invalid envelope address");
                return false;
            }
        };

        match self
            .transport
            .send_raw(&envelope, email.preferred_body().as_bytes())
            .await
        {
            Ok(response) => {
                tracing::debug!(
                    provider = "smtp",
                    host = %self.host,
                    port = self.port,
                    code = %response.code(),
                    "smtp server accepted email"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    provider = "smtp",
                    host = %self.host,
                    port = self.port,
                    error = %e,
                    "smtp delivery failed"
                );
                false
            }
        }
    }
}
