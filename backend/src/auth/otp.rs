//! Time-based one-time passwords (RFC 6238)
//!
//! Secrets are 160 random bits, base32 encoded without padding, which is
//! what authenticator apps expect when the secret is typed in by hand.

use crate::config::OtpConfig;
use anyhow::{Context, Result};
use exercisedb_shared::AuthError;
use std::time::{SystemTime, UNIX_EPOCH};
use totp_rs::{Algorithm, Secret, TOTP};

/// TOTP generator/verifier with fixed digits, step and skew
#[derive(Debug, Clone)]
pub struct OtpService {
    digits: usize,
    step_secs: u64,
    skew: u8,
}

impl OtpService {
    pub fn new(config: &OtpConfig) -> Self {
        Self {
            digits: config.digits,
            step_secs: config.step_secs,
            skew: config.skew,
        }
    }

    /// Fresh base32 secret for a new user
    pub fn generate_secret(&self) -> String {
        Secret::generate_secret().to_encoded().to_string()
    }

    fn totp(&self, secret: &str) -> Result<TOTP, AuthError> {
        let bytes = Secret::Encoded(secret.to_string())
            .to_bytes()
            .map_err(|_| AuthError::MalformedSecret)?;

        TOTP::new(Algorithm::SHA1, self.digits, self.skew, self.step_secs, bytes)
            .map_err(|_| AuthError::MalformedSecret)
    }

    /// Code for `secret` at the given Unix time
    pub fn generate_at(&self, secret: &str, unix_time: u64) -> Result<String, AuthError> {
        Ok(self.totp(secret)?.generate(unix_time))
    }

    /// Check `code` at the given Unix time, tolerating `skew` steps either side
    pub fn verify_at(&self, secret: &str, code: &str, unix_time: u64) -> Result<(), AuthError> {
        if self.totp(secret)?.check(code, unix_time) {
            Ok(())
        } else {
            Err(AuthError::InvalidCode)
        }
    }

    /// Check `code` against the current time
    pub fn verify(&self, secret: &str, code: &str) -> Result<(), AuthError> {
        self.verify_with_clock(secret, code, unix_now())
    }

    fn verify_with_clock(&self, secret: &str, code: &str, now: Result<u64>) -> Result<(), AuthError> {
        let now = now.map_err(|_| AuthError::ClockUnavailable)?;
        self.verify_at(secret, code, now)
    }

    /// Code for `secret` right now
    pub fn generate_current(&self, secret: &str) -> Result<String> {
        let now = unix_now()?;
        self.generate_at(secret, now)
            .context("cannot generate code for secret")
    }
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs())
}
