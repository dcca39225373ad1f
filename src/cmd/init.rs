//! `mailswitch init`: generate a starter providers file.
//!
//! Writes a JSON, YAML, or TOML providers list: either a single `test`
//! provider, or with `--full` one placeholder entry per provider in
//! failover order. Never overwrites an existing file.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::MailSwitchError;

pub fn execute(args: &InitArgs) -> Result<(), MailSwitchError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("providers.{}", args.format.extension())));

    if output.exists() {
        return Err(MailSwitchError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    if args.full {
        println!("  Replace the placeholder credentials, then run: mailswitch validate {}", output.display());
    }
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const JSON_MINIMAL: &str = r#"[
  { "id": "test" }
]
"#;

const JSON_FULL: &str = r#"[
  { "id": "resend", "token": "re_xxxxxxxx" },
  { "id": "brevo", "token": "xkeysib-xxxxxxxx" },
  { "id": "sendgrid", "token": "SG.xxxxxxxx" },
  {
    "id": "smtp",
    "host": "smtp.example.com",
    "port": 587,
    "user": "mailer@example.com",
    "password": "changeme"
  },
  { "id": "test" }
]
"#;

const YAML_MINIMAL: &str = r#"# mailswitch providers, tried top to bottom until one accepts the email.

- id: test
"#;

const YAML_FULL: &str = r#"# mailswitch providers, tried top to bottom until one accepts the email.
# An entry that cannot be used is skipped with a warning at startup.

# Resend (https://resend.com), Bearer token
- id: resend
  token: "re_xxxxxxxx"
  # endpoint: "https://api.resend.com/emails"

# Brevo (https://brevo.com), api-key header
- id: brevo
  token: "xkeysib-xxxxxxxx"

# SendGrid (https://sendgrid.com), Bearer token
- id: sendgrid
  token: "SG.xxxxxxxx"

# Any SMTP relay, STARTTLS when offered, PLAIN auth
- id: smtp
  host: "smtp.example.com"
  port: 587
  user: "mailer@example.com"
  password: "changeme"

# Logs the email and always succeeds; keep last as a development fallback
- id: test
"#;

const TOML_MINIMAL: &str = r#"# mailswitch providers, tried in order until one accepts the email.

[[providers]]
id = "test"
"#;

const TOML_FULL: &str = r#"# mailswitch providers, tried in order until one accepts the email.
# An entry that cannot be used is skipped with a warning at startup.

[[providers]]
id = "resend"
token = "re_xxxxxxxx"
# endpoint = "https://api.resend.com/emails"

[[providers]]
id = "brevo"
token = "xkeysib-xxxxxxxx"

[[providers]]
id = "sendgrid"
token = "SG.xxxxxxxx"

[[providers]]
id = "smtp"
host = "smtp.example.com"
port = 587
user = "mailer@example.com"
password = "changeme"

[[providers]]
id = "test"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::PROVIDER_IDS;
    use crate::config::sources::parse_providers_str;
    use crate::providers::registry::decode_entry;

    fn decoded_ids(ext: &str, content: &str) -> Vec<String> {
        parse_providers_str(ext, content, "template")
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, entry)| decode_entry(i, entry).unwrap().id().to_string())
            .collect()
    }

    #[test]
    fn json_templates_decode() {
        assert_eq!(decoded_ids("json", JSON_MINIMAL), vec!["test"]);
        assert_eq!(decoded_ids("json", JSON_FULL), PROVIDER_IDS);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_templates_decode() {
        assert_eq!(decoded_ids("yaml", YAML_MINIMAL), vec!["test"]);
        assert_eq!(decoded_ids("yaml", YAML_FULL), PROVIDER_IDS);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_templates_decode() {
        assert_eq!(decoded_ids("toml", TOML_MINIMAL), vec!["test"]);
        assert_eq!(decoded_ids("toml", TOML_FULL), PROVIDER_IDS);
    }

    #[test]
    fn refuses_to_overwrite() {
        let path = std::env::temp_dir().join(format!("mailswitch-init-{}.json", uuid::Uuid::new_v4()));
        let args = InitArgs {
            format: ConfigFormat::Json,
            output: Some(path.clone()),
            full: false,
        };

        execute(&args).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), JSON_MINIMAL);
        assert!(matches!(
            execute(&args),
            Err(MailSwitchError::FileExists { .. })
        ));

        std::fs::remove_file(&path).unwrap();
    }
}
