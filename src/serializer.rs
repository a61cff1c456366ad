//! Structured serializer: signs any `serde` value with a deadline and an
//! optional salt.
//!
//! Token: `<raw>::<hex-mac>::<deadline>` where `raw` is the JSON encoding of
//! the value in unpadded base64url, so it can never contain the delimiter.
//! The MAC covers `raw-salt::<decimal deadline>`.
//!
//! The salt is ordinary instance state. Changing it requires `&mut self`;
//! share a `Serializer` across threads behind a lock if the salt must change
//! while others are signing.

use std::time::Duration;

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SignerError};
use crate::mac::MacEngine;
use crate::token::{join_fields, split_fields, unix_now, Deadline, TIMED_FIELDS};
use crate::types::{HashAlgorithm, SecretKey, DELIMITER, SALT_SEPARATOR};

const B64: base64::engine::GeneralPurpose = base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Signs and verifies `serde` values bound to a deadline and a salt.
#[derive(Debug, Clone)]
pub struct Serializer {
    mac: MacEngine,
    salt: String,
}

impl Serializer {
    /// Serializer using HMAC-SHA1 and an empty salt.
    pub fn new(key: impl Into<SecretKey>) -> Self {
        Self::with_algorithm(key, HashAlgorithm::default())
    }

    pub fn with_algorithm(key: impl Into<SecretKey>, algorithm: HashAlgorithm) -> Self {
        Serializer {
            mac: MacEngine::new(key.into(), algorithm),
            salt: String::new(),
        }
    }

    /// Builder form of [`Serializer::set_salt`].
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.set_salt(salt);
        self
    }

    /// Replace the salt. Affects every later `dump` and `load`.
    pub fn set_salt(&mut self, salt: impl Into<String>) {
        self.salt = salt.into();
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.mac.algorithm()
    }

    /// Encode and sign `value` so that it loads for `ttl` from now.
    pub fn dump<T: Serialize + ?Sized>(&self, value: &T, ttl: Duration) -> Result<String> {
        self.dump_at(value, ttl, unix_now())
    }

    pub fn dump_at<T: Serialize + ?Sized>(
        &self,
        value: &T,
        ttl: Duration,
        now: i64,
    ) -> Result<String> {
        let json = serde_json::to_vec(value)
            .map_err(|e| SignerError::bad_data_with(std::any::type_name::<T>(), e))?;
        let raw = B64.encode(json);
        let deadline = Deadline::after(now, ttl);
        let tag = self.mac.compute_hex(self.mac_input(&raw, &deadline).as_bytes())?;
        Ok(join_fields(&[raw.as_str(), tag.as_str(), deadline.encode().as_str()]))
    }

    /// Verify `token` against the current time and decode its value.
    pub fn load<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        self.load_at(token, unix_now())
    }

    pub fn load_at<T: DeserializeOwned>(&self, token: &str, now: i64) -> Result<T> {
        let json = self.verified_json(token, now)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Verify `token` and decode its value into `out`. `out` is left
    /// untouched on any failure.
    pub fn load_into<T: DeserializeOwned>(&self, token: &str, out: &mut T) -> Result<()> {
        *out = self.load(token)?;
        Ok(())
    }

    /// Run the verification steps and return the authenticated JSON bytes.
    fn verified_json(&self, token: &str, now: i64) -> Result<Vec<u8>> {
        let fields = split_fields(token, TIMED_FIELDS)?;
        let [raw, tag, deadline] = fields.as_slice() else {
            return Err(SignerError::bad_data(token));
        };
        let deadline = Deadline::decode(deadline, token)?;
        deadline.check(now)?;
        if !self.mac.verify_hex(self.mac_input(raw, &deadline).as_bytes(), tag)? {
            return Err(SignerError::bad_data(token));
        }
        B64.decode(raw).map_err(|e| SignerError::bad_data_with(token, e))
    }

    fn mac_input(&self, raw: &str, deadline: &Deadline) -> String {
        format!("{raw}{SALT_SEPARATOR}{}{DELIMITER}{}", self.salt, deadline.text)
    }
}
