//! Providers list given inline through `PROVIDERS_VALUE` (always JSON).

use async_trait::async_trait;

use super::{parse_providers_str, sha256_hex};
use crate::config::{ConfigVersion, ProvidersSource, RawProviders};
use crate::error::MailSwitchError;

pub struct InlineSource {
    value: String,
}

impl InlineSource {
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self { value }
    }
}

#[async_trait]
impl ProvidersSource for InlineSource {
    fn name(&self) -> &'static str {
        "inline"
    }

    async fn load(&self) -> Result<(RawProviders, ConfigVersion), MailSwitchError> {
        let entries = parse_providers_str("json", &self.value, "PROVIDERS_VALUE")?;
        Ok((entries, ConfigVersion::Hash(sha256_hex(self.value.as_bytes()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_inline_json() {
        let source = InlineSource::new(r#"[{"id":"test"},{"id":"brevo","token":"k"}]"#.into());
        let (entries, _) = source.load().await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn malformed_inline_json_is_fatal() {
        let source = InlineSource::new("[{".into());
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("PROVIDERS_VALUE"));
    }
}
