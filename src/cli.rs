//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, init, validate, health), and their associated
//! argument structs. Every `run` flag has an environment variable
//! equivalent, which may also come from a `.env` file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "mailswitch",
    version,
    about = "Failover dispatcher for transactional email",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        mailswitch init                          Create ./providers.json\n  \
        mailswitch validate                      Check ./providers.json\n  \
        ROOT_API_KEY=secret mailswitch run       Start on port 8080"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Run(Box<RunArgs>),

    /// Generate a starter providers file
    Init(InitArgs),

    /// Validate a providers file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        mailswitch run --root-api-key secret                       Providers from ./providers.json\n  \
        mailswitch run --providers-file providers.yaml --pretty    Local dev mode\n  \
        PROVIDERS_VALUE='[{\"id\":\"test\"}]' mailswitch run        Inline providers")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Providers --
    /// Inline providers list as a JSON array (wins over the file when not blank)
    #[arg(long, env = "PROVIDERS_VALUE", help_heading = "Providers")]
    pub providers_value: Option<String>,

    /// Providers file path (.json, .yaml, .toml)
    #[arg(
        long,
        env = "PROVIDERS_FILE",
        default_value = "./providers.json",
        help_heading = "Providers"
    )]
    pub providers_file: PathBuf,

    // -- Security --
    /// Bearer token required on /api/emails
    #[arg(
        long,
        env = "ROOT_API_KEY",
        hide_env_values = true,
        help_heading = "Security"
    )]
    pub root_api_key: Option<String>,

    /// Enable the signed /qstash webhook route (env accepts true/false, 1/0, yes/no)
    #[arg(
        long,
        env = "QSTASH",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new(),
        help_heading = "Security"
    )]
    pub qstash: bool,

    /// Current webhook signing key
    #[arg(
        long,
        env = "QSTASH_CURRENT_SIGNING_KEY",
        hide_env_values = true,
        help_heading = "Security"
    )]
    pub qstash_current_signing_key: Option<String>,

    /// Next webhook signing key (accepted during rotation)
    #[arg(
        long,
        env = "QSTASH_NEXT_SIGNING_KEY",
        hide_env_values = true,
        help_heading = "Security"
    )]
    pub qstash_next_signing_key: Option<String>,

    /// Clock skew tolerated on webhook token timestamps, in seconds
    #[arg(
        long,
        env = "WEBHOOK_LEEWAY_SECS",
        default_value_t = 1,
        help_heading = "Security"
    )]
    pub webhook_leeway: u64,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,

    // -- Tuning --
    /// Per-provider timeout in milliseconds
    #[arg(
        long,
        env = "PROVIDER_TIMEOUT_MS",
        default_value_t = 10_000,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 1_048_576,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        mailswitch init                             Single test provider (json)\n  \
        mailswitch init --full                      Every provider, with placeholders\n  \
        mailswitch init -f yaml -o providers.yaml   YAML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include an example entry for every provider
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Providers file to validate
    #[arg(env = "PROVIDERS_FILE", default_value = "providers.json")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:8080")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
