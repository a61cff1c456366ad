//! Timed signer: `<payload>::<hex-mac>::<deadline>`.
//!
//! The MAC covers `payload::<decimal deadline>`, so the deadline cannot be
//! moved without invalidating the token. Verification checks expiry before
//! the MAC: a well-formed token past its deadline reports `DataExpired`
//! rather than `BadData`. A forged deadline is still rejected, either as
//! expired or by the MAC check that follows.

use std::time::Duration;

use crate::error::{Result, SignerError};
use crate::mac::MacEngine;
use crate::sign::check_payload;
use crate::token::{join_fields, split_fields, unix_now, Deadline, TIMED_FIELDS};
use crate::types::{HashAlgorithm, SecretKey, DELIMITER};

/// Signs and verifies strings bound to an expiration deadline.
#[derive(Debug, Clone)]
pub struct TimedSigner {
    mac: MacEngine,
}

impl TimedSigner {
    /// Timed signer using HMAC-SHA1.
    pub fn new(key: impl Into<SecretKey>) -> Self {
        Self::with_algorithm(key, HashAlgorithm::default())
    }

    pub fn with_algorithm(key: impl Into<SecretKey>, algorithm: HashAlgorithm) -> Self {
        TimedSigner {
            mac: MacEngine::new(key.into(), algorithm),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.mac.algorithm()
    }

    /// Sign `payload` so that it verifies for `ttl` from now.
    pub fn sign(&self, payload: &str, ttl: Duration) -> Result<String> {
        self.sign_at(payload, ttl, unix_now())
    }

    /// Sign `payload` with a deadline of `now + ttl`.
    pub fn sign_at(&self, payload: &str, ttl: Duration, now: i64) -> Result<String> {
        check_payload(payload)?;
        let deadline = Deadline::after(now, ttl);
        let tag = self.mac.compute_hex(mac_input(payload, &deadline).as_bytes())?;
        Ok(join_fields(&[payload, tag.as_str(), deadline.encode().as_str()]))
    }

    /// Verify a token against the current time and return its payload.
    pub fn verify(&self, token: &str) -> Result<String> {
        self.verify_at(token, unix_now())
    }

    /// Verify a token as of `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<String> {
        let fields = split_fields(token, TIMED_FIELDS)?;
        let [payload, tag, deadline] = fields.as_slice() else {
            return Err(SignerError::bad_data(token));
        };
        let deadline = Deadline::decode(deadline, token)?;
        deadline.check(now)?;
        if !self.mac.verify_hex(mac_input(payload, &deadline).as_bytes(), tag)? {
            return Err(SignerError::bad_data(token));
        }
        Ok((*payload).to_string())
    }
}

fn mac_input(payload: &str, deadline: &Deadline) -> String {
    format!("{payload}{DELIMITER}{}", deadline.text)
}
