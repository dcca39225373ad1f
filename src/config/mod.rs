//! Providers configuration loading.
//!
//! Defines the [`ProvidersSource`] trait for the places a providers list
//! can come from (an inline environment value or a file), the
//! [`ConfigVersion`] fingerprint reported by `/health`, and
//! [`resolve_source`], which picks the source once at startup. The
//! [`model`] submodule holds the per-provider schema.

pub mod model;
pub mod sources;

use std::path::Path;

use async_trait::async_trait;

use crate::error::MailSwitchError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// First eight hex characters, enough to tell deployments apart.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

/// Raw providers entries in configured order, not yet decoded per provider.
pub type RawProviders = Vec<serde_json::Value>;

// async_trait is required here because sources are used as Box<dyn ProvidersSource>.
#[async_trait]
pub trait ProvidersSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(RawProviders, ConfigVersion), MailSwitchError>;
}

/// Inline value wins when it is not blank, otherwise the file is used.
pub fn resolve_source(
    inline: Option<&str>,
    file: &Path,
) -> Result<Box<dyn ProvidersSource>, MailSwitchError> {
    match inline {
        Some(value) if !value.trim().is_empty() => {
            Ok(Box::new(sources::inline::InlineSource::new(value.to_string())))
        }
        _ => sources::file_source::FileSource::from_path(file)
            .map(|s| Box::new(s) as Box<dyn ProvidersSource>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_value_wins_over_file() {
        let source = resolve_source(Some(r#"[{"id":"test"}]"#), Path::new("providers.json")).unwrap();
        assert_eq!(source.name(), "inline");
    }

    #[test]
    fn blank_inline_value_falls_back_to_file() {
        let source = resolve_source(Some("   "), Path::new("providers.json")).unwrap();
        assert_eq!(source.name(), "json");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let result = resolve_source(None, Path::new("providers.xml"));
        assert!(matches!(result, Err(MailSwitchError::UnsupportedFormat(ext)) if ext == "xml"));
    }

    #[test]
    fn short_version_is_eight_chars() {
        let v = ConfigVersion::Hash("0123456789abcdef".into());
        assert_eq!(v.short(), "01234567");
        assert_eq!(ConfigVersion::Hash("abc".into()).short(), "abc");
    }
}
