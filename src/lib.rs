//! mailswitch is a failover dispatcher for transactional email.
//!
//! It accepts an email request over HTTP, validates it, and hands it to an
//! ordered list of delivery providers (Resend, Brevo, SendGrid, any SMTP
//! relay, or a logging test provider). Providers are tried one at a time
//! in configured order; the first that accepts the email ends the attempt.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate, health).
//! - [`config`] -- Providers list loading from an inline value or a file via
//!   the [`ProvidersSource`](config::ProvidersSource) trait.
//! - [`email`] -- The [`EmailRequest`](email::EmailRequest) model and its
//!   validation rules.
//! - [`providers`] -- The [`EmailSender`](providers::EmailSender) contract,
//!   one adapter per provider, and the registry that builds them.
//! - [`dispatch`] -- [`EmailSwitch`](dispatch::EmailSwitch), the sequential
//!   failover loop.
//! - [`api`] -- HTTP handlers for `/api/emails` and the signed `/qstash` webhook.
//! - [`middleware`] -- Bearer-token authentication layer.
//! - [`signature`] -- Webhook signature verification with key rotation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum router, shared application state, and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML providers file support _(enabled by default)_ |
//! | `toml` | TOML providers file support |
//! | `sentry-integration` | Sentry error tracking |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod email;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod providers;
pub mod server;
pub mod signature;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
