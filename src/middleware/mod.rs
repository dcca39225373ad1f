//! Tower middleware layers.
//!
//! [`auth`] guards the `/api` routes with the root bearer token.
//! Correlation ids are handled inline by the handlers in [`api`](crate::api).

pub mod auth;
