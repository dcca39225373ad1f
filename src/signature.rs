//! Signed-webhook verification for the QStash delivery path.
//!
//! The `Upstash-Signature` header carries an HS256 JWT issued by `Upstash`
//! whose `body` claim is the unpadded base64url SHA-256 of the raw request
//! body. A request is accepted when either the current or the next signing
//! key validates the token and the body hash matches, which lets keys be
//! rotated without downtime.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, get_current_timestamp, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use sha2::{Digest, Sha256};

pub const ISSUER: &str = "Upstash";

#[derive(Debug, Deserialize)]
struct WebhookClaims {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    iat: Option<u64>,
}

#[derive(Clone)]
pub struct SigningKeys {
    current: String,
    next: String,
    leeway_secs: u64,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

impl SigningKeys {
    #[must_use]
    pub const fn new(current: String, next: String, leeway_secs: u64) -> Self {
        Self {
            current,
            next,
            leeway_secs,
        }
    }

    /// Accept if the current key verifies, otherwise retry with the next key.
    #[must_use]
    pub fn verify(&self, token: &str, body: &[u8]) -> bool {
        verify_with_key(&self.current, token, body, self.leeway_secs)
            || verify_with_key(&self.next, token, body, self.leeway_secs)
    }
}

#[must_use]
pub fn verify_with_key(key: &str, token: &str, body: &[u8], leeway_secs: u64) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.leeway = leeway_secs;
    validation.validate_nbf = true;
    validation.validate_aud = false;

    let claims = match decode::<WebhookClaims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!(error = %e, "webhook token rejected");
            return false;
        }
    };

    // jsonwebtoken does not check iat; a token from the future is refused
    if claims
        .iat
        .is_some_and(|iat| iat > get_current_timestamp() + leeway_secs)
    {
        tracing::debug!("webhook token issued in the future");
        return false;
    }

    let Some(claimed) = claims.body else {
        tracing::debug!("webhook token has no body claim");
        return false;
    };

    constant_time_eq(claimed.trim_end_matches('=').as_bytes(), body_hash(body).as_bytes())
}

/// Unpadded base64url SHA-256 of `body`.
#[must_use]
pub fn body_hash(body: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(body))
}

/// Constant-time byte comparison
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
