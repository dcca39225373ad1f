//! Builds the ordered sender list from raw providers entries.
//!
//! Each entry is decoded into a [`ProviderConfig`] by its `id`
//! discriminant and turned into the matching adapter. An entry that
//! cannot be decoded or built is skipped and reported as a
//! [`ProviderConfigError`]; the remaining entries are still processed and
//! keep their relative order.

use std::time::Duration;

use serde_json::Value;

use super::brevo::BrevoSender;
use super::http::HttpClient;
use super::noop::TestSender;
use super::resend::ResendSender;
use super::sendgrid::SendGridSender;
use super::smtp::SmtpSender;
use super::{BuildError, EmailSender};
use crate::config::model::{ProviderConfig, PROVIDER_IDS};
use crate::error::ProviderConfigError;

/// What every adapter may need at construction time.
#[derive(Clone)]
pub struct SenderContext {
    pub http_client: HttpClient,
    pub timeout: Duration,
}

pub struct ParsedProviders {
    pub senders: Vec<Box<dyn EmailSender>>,
    pub errors: Vec<ProviderConfigError>,
}

impl ParsedProviders {
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.senders.iter().map(|s| s.name()).collect()
    }
}

#[must_use]
pub fn parse(entries: &[Value], ctx: &SenderContext) -> ParsedProviders {
    let mut senders = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let config = match decode_entry(index, entry) {
            Ok(c) => c,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        match build_sender(&config, ctx) {
            Ok(sender) => senders.push(sender),
            Err(e) => errors.push(ProviderConfigError {
                index,
                id: Some(config.id().to_string()),
                message: e.to_string(),
                suggestion: None,
            }),
        }
    }

    ParsedProviders { senders, errors }
}

/// Decode one raw entry, distinguishing a missing or unknown `id` from a
/// malformed provider-specific field.
pub fn decode_entry(index: usize, entry: &Value) -> Result<ProviderConfig, ProviderConfigError> {
    let Some(object) = entry.as_object() else {
        return Err(ProviderConfigError {
            index,
            id: None,
            message: "entry is not an object".into(),
            suggestion: None,
        });
    };

    let id = match object.get("id") {
        None => {
            return Err(ProviderConfigError {
                index,
                id: None,
                message: "missing 'id' field".into(),
                suggestion: Some(format!("expected one of {}", PROVIDER_IDS.join(", "))),
            })
        }
        Some(Value::String(id)) => id,
        Some(_) => {
            return Err(ProviderConfigError {
                index,
                id: None,
                message: "'id' must be a string".into(),
                suggestion: None,
            })
        }
    };

    if !PROVIDER_IDS.contains(&id.as_str()) {
        return Err(ProviderConfigError {
            index,
            id: Some(id.clone()),
            message: "no provider with this id".into(),
            suggestion: Some(format!("expected one of {}", PROVIDER_IDS.join(", "))),
        });
    }

    serde_json::from_value::<ProviderConfig>(entry.clone()).map_err(|e| ProviderConfigError {
        index,
        id: Some(id.clone()),
        message: e.to_string(),
        suggestion: None,
    })
}

pub fn build_sender(
    config: &ProviderConfig,
    ctx: &SenderContext,
) -> Result<Box<dyn EmailSender>, BuildError> {
    let sender: Box<dyn EmailSender> = match config {
        ProviderConfig::Resend(c) => Box::new(ResendSender::new(
            ctx.http_client.clone(),
            &c.token,
            c.endpoint.as_deref(),
            ctx.timeout,
        )?),
        ProviderConfig::Brevo(c) => Box::new(BrevoSender::new(
            ctx.http_client.clone(),
            &c.token,
            c.endpoint.as_deref(),
            ctx.timeout,
        )?),
        ProviderConfig::SendGrid(c) => Box::new(SendGridSender::new(
            ctx.http_client.clone(),
            &c.token,
            c.endpoint.as_deref(),
            ctx.timeout,
        )?),
        ProviderConfig::Smtp(c) => Box::new(SmtpSender::new(c, ctx.timeout)?),
        ProviderConfig::Test => Box::new(TestSender),
    };
    Ok(sender)
}
