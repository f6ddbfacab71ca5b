//! Signed, time-limited CSRF tokens.
//!
//! A token is `"{nonce}.{issued_at}.{signature}"` where the signature is
//! HMAC-SHA256 over `"{nonce}.{issued_at}"` keyed with the application's
//! secret key, hex encoded.

use crate::config::app_config::SecurityConfig;
use crate::utils::error::{ConverterError, Result};
use rand::RngCore;
use ring::hmac;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const CSRF_HEADER: &str = "x-csrftoken";
pub const CSRF_HEADER_ALT: &str = "x-csrf-token";

const NONCE_LEN: usize = 16;
const GENERATED_KEY_LEN: usize = 32;
/// Tolerated clock drift for tokens stamped slightly in the future.
const MAX_CLOCK_SKEW_SECS: u64 = 60;

#[derive(Clone)]
pub struct CsrfGuard {
    key: hmac::Key,
    time_limit: Duration,
    enforce: bool,
}

impl std::fmt::Debug for CsrfGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfGuard")
            .field("time_limit", &self.time_limit)
            .field("enforce", &self.enforce)
            .finish_non_exhaustive()
    }
}

impl CsrfGuard {
    pub fn new(secret_key: &[u8], time_limit: Duration, enforce: bool) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret_key),
            time_limit,
            enforce,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        let time_limit = Duration::from_secs(security.csrf_time_limit_secs);
        match &security.secret_key {
            Some(key) => Self::new(key.as_bytes(), time_limit, security.csrf_enforce),
            None => {
                tracing::warn!(
                    "No security.secret_key configured; generated a random key, issued CSRF tokens will not survive a restart"
                );
                let mut key = [0u8; GENERATED_KEY_LEN];
                rand::thread_rng().fill_bytes(&mut key);
                Self::new(&key, time_limit, security.csrf_enforce)
            }
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    pub fn issue(&self) -> String {
        self.issue_at(unix_now())
    }

    pub fn issue_at(&self, issued_at: u64) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let payload = format!("{}.{}", hex::encode(nonce), issued_at);
        let signature = self.sign(&payload);
        format!("{payload}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Result<()> {
        self.verify_at(token, unix_now())
    }

    pub fn verify_at(&self, token: &str, now: u64) -> Result<()> {
        let mut parts = token.trim().splitn(3, '.');
        let (Some(nonce), Some(issued), Some(signature)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ConverterError::csrf("malformed token"));
        };

        let issued_at: u64 = issued
            .parse()
            .map_err(|_| ConverterError::csrf("malformed token timestamp"))?;

        let expected = self.sign(&format!("{nonce}.{issued}"));
        if !bool::from(subtle::ConstantTimeEq::ct_eq(
            signature.as_bytes(),
            expected.as_bytes(),
        )) {
            return Err(ConverterError::csrf("signature mismatch"));
        }

        if issued_at > now.saturating_add(MAX_CLOCK_SKEW_SECS) {
            return Err(ConverterError::csrf("token issued in the future"));
        }
        if now.saturating_sub(issued_at) > self.time_limit.as_secs() {
            return Err(ConverterError::csrf("token expired"));
        }

        Ok(())
    }

    fn sign(&self, payload: &str) -> String {
        let tag = hmac::sign(&self.key, payload.as_bytes());
        hex::encode(tag.as_ref())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
