//! Concrete [`ProvidersSource`](super::ProvidersSource) implementations.
//!
//! [`file_source`] reads a providers file whose format follows its
//! extension; [`inline`] parses the JSON held in `PROVIDERS_VALUE`.
//! [`parse_providers_str`] is the shared format-specific decoder.

pub mod file_source;
pub mod inline;

use sha2::{Digest, Sha256};

use super::RawProviders;
use crate::error::MailSwitchError;

/// TOML has no top-level arrays, so providers live under `[[providers]]`.
#[cfg(feature = "toml")]
#[derive(serde::Deserialize)]
struct TomlProviders {
    #[serde(default)]
    providers: RawProviders,
}

/// Parse a providers list based on file extension.
pub fn parse_providers_str(
    ext: &str,
    content: &str,
    source_name: &str,
) -> Result<RawProviders, MailSwitchError> {
    let parse_err = |e: Box<dyn std::error::Error + Send + Sync>| MailSwitchError::ProvidersParse {
        source_name: source_name.to_string(),
        source: e,
    };

    match ext {
        "json" => serde_json::from_str::<RawProviders>(content).map_err(|e| parse_err(Box::new(e))),

        #[cfg(feature = "yaml")]
        "yaml" | "yml" => {
            serde_yml::from_str::<RawProviders>(content).map_err(|e| parse_err(Box::new(e)))
        }

        #[cfg(feature = "toml")]
        "toml" => toml::from_str::<TomlProviders>(content)
            .map(|t| t.providers)
            .map_err(|e| parse_err(Box::new(e))),

        other => Err(MailSwitchError::UnsupportedFormat(other.to_string())),
    }
}

/// Whether a providers file with this extension can be read by this build.
#[must_use]
pub fn is_supported_extension(ext: &str) -> bool {
    match ext {
        "json" => true,
        "yaml" | "yml" => cfg!(feature = "yaml"),
        "toml" => cfg!(feature = "toml"),
        _ => false,
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
