//! Async file-based providers source with SHA-256 fingerprinting.
//!
//! [`FileSource`] implements [`ProvidersSource`] for any supported
//! format. The format is fixed at construction from the file extension;
//! the file itself is read asynchronously via Tokio when loaded.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{is_supported_extension, parse_providers_str, sha256_hex};
use crate::config::{ConfigVersion, ProvidersSource, RawProviders};
use crate::error::MailSwitchError;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
}

impl FileSource {
    pub fn from_path(path: &Path) -> Result<Self, MailSwitchError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !is_supported_extension(ext) {
            return Err(MailSwitchError::UnsupportedFormat(ext.to_string()));
        }
        let name = match ext {
            "yaml" | "yml" => "yaml",
            "toml" => "toml",
            _ => "json",
        };
        Ok(Self {
            path: path.to_path_buf(),
            name,
        })
    }

    async fn read_content(&self) -> Result<String, MailSwitchError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MailSwitchError::ProvidersFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                MailSwitchError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ProvidersSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(RawProviders, ConfigVersion), MailSwitchError> {
        let content = self.read_content().await?;
        let ext = self.path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let entries = parse_providers_str(ext, &content, &self.path.display().to_string())?;
        Ok((entries, ConfigVersion::Hash(sha256_hex(content.as_bytes()))))
    }
}
