//! Test adapter: logs the request instead of delivering it.

use async_trait::async_trait;

use super::EmailSender;
use crate::email::EmailRequest;

#[derive(Debug, Default, Clone, Copy)]
pub struct TestSender;

#[async_trait]
impl EmailSender for TestSender {
    fn name(&self) -> &'static str {
        "test"
    }

    async fn send(&self, email: &EmailRequest) -> bool {
        tracing::info!(
            provider = "test",
            from_email = %email.from_email,
            from_name = %email.from_name.as_deref().unwrap_or_default(),
            to = %email.to.join(", "),
            subject = %email.subject,
            text = %email.text,
            "test sender received email"
        );
        true
    }
}
