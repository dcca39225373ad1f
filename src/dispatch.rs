//! Ordered failover across configured senders.
//!
//! [`EmailSwitch`] tries each sender in configured order and stops at the
//! first one that accepts the email. Attempts are strictly sequential: the
//! next sender is only tried after the previous one has definitively
//! failed. The switch holds no state between calls.

use std::time::Instant;

use crate::email::EmailRequest;
use crate::providers::EmailSender;

pub struct EmailSwitch {
    senders: Vec<Box<dyn EmailSender>>,
}

impl EmailSwitch {
    #[must_use]
    pub fn new(senders: Vec<Box<dyn EmailSender>>) -> Self {
        Self { senders }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.senders.iter().map(|s| s.name()).collect()
    }

    /// `true` as soon as one sender succeeds; `false` if all fail or none exist.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn send(&self, email: &EmailRequest) -> bool {
        for (attempt, sender) in self.senders.iter().enumerate() {
            let start = Instant::now();
            let sent = sender.send(email).await;
            let latency_ms = start.elapsed().as_millis() as u64;

            if sent {
                tracing::info!(
                    provider = sender.name(),
                    attempt = attempt + 1,
                    latency_ms,
                    "email delivered"
                );
                return true;
            }
            tracing::warn!(
                provider = sender.name(),
                attempt = attempt + 1,
                latency_ms,
                "provider failed"
            );
        }

        tracing::error!(providers = self.senders.len(), "all providers failed");
        false
    }
}
