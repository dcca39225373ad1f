//! Provider adapters: one [`EmailSender`] per delivery backend.
//!
//! Each adapter owns its credentials and translates an
//! [`EmailRequest`](crate::email::EmailRequest) into its vendor's wire
//! format. Transport errors, non-2xx statuses and serialization failures
//! are logged and collapsed to `false`; nothing propagates past
//! [`EmailSender::send`]. The [`registry`] builds the ordered adapter
//! list from configuration.

pub mod brevo;
pub mod http;
pub mod noop;
pub mod registry;
pub mod resend;
pub mod sendgrid;
pub mod smtp;

use async_trait::async_trait;

use crate::email::EmailRequest;

// async_trait is required here because senders are held as Box<dyn EmailSender>.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Stable provider id used in logs.
    fn name(&self) -> &'static str;

    /// Attempt delivery. `true` means the backend accepted the message.
    async fn send(&self, email: &EmailRequest) -> bool;
}

/// Why a configured provider could not be turned into a sender.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("invalid endpoint '{url}': {source}")]
    Endpoint {
        url: String,
        #[source]
        source: ::http::uri::InvalidUri,
    },

    #[error("token contains characters not allowed in an HTTP header")]
    Token(#[from] ::http::header::InvalidHeaderValue),

    #[error("smtp transport: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
