//! Unified error types for mailswitch.
//!
//! Defines [`MailSwitchError`] (fatal startup and CLI errors) and
//! [`ProviderConfigError`], the diagnostic emitted for a providers entry
//! that cannot be turned into a sender. Adapter failures never show up
//! here: they are logged and collapsed to `false` inside the adapter.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfigError {
    pub index: usize,
    pub id: Option<String>,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ProviderConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(ref id) => write!(f, "  providers[{}] ({id}): {}", self.index, self.message)?,
            None => write!(f, "  providers[{}]: {}", self.index, self.message)?,
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderConfigError {}

fn format_errors(errors: &[ProviderConfigError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MailSwitchError {
    #[error("Providers file not found: {}", path.display())]
    ProvidersFileNotFound { path: PathBuf },

    #[error("Providers parse error in {source_name}:\n  {source}")]
    ProvidersParse {
        source_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Providers config has invalid entries:\n{}", format_errors(.errors))]
    ProviderConfig { errors: Vec<ProviderConfigError> },

    #[error("Unsupported providers format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Missing required setting {name}.\n\n  {hint}")]
    MissingSetting { name: &'static str, hint: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
