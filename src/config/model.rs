//! Serde data structures for one entry of the providers list.
//!
//! [`ProviderConfig`] is internally tagged by `id`, so the discriminant
//! selects which shape is expected and a mistyped field (say a string
//! `port`) is a decode error instead of a panic.

use serde::{Deserialize, Serialize};

/// Every `id` the registry knows how to build, in documentation order.
pub const PROVIDER_IDS: &[&str] = &["resend", "brevo", "sendgrid", "smtp", "test"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "id", rename_all = "lowercase")]
pub enum ProviderConfig {
    Resend(HostedApiConfig),
    Brevo(HostedApiConfig),
    SendGrid(HostedApiConfig),
    Smtp(SmtpConfig),
    Test,
}

impl ProviderConfig {
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Resend(_) => "resend",
            Self::Brevo(_) => "brevo",
            Self::SendGrid(_) => "sendgrid",
            Self::Smtp(_) => "smtp",
            Self::Test => "test",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostedApiConfig {
    pub token: String,

    /// Overrides the vendor's fixed endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}
