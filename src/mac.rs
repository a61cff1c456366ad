//! Keyed MAC computation: HMAC over SHA-1 or SHA-2.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::error::{Result, SignerError};
use crate::types::{HashAlgorithm, SecretKey};

/// HMAC engine bound to one key and one hash algorithm for its lifetime.
#[derive(Debug, Clone)]
pub struct MacEngine {
    key: SecretKey,
    algorithm: HashAlgorithm,
}

impl MacEngine {
    pub fn new(key: SecretKey, algorithm: HashAlgorithm) -> Self {
        MacEngine { key, algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Compute the raw MAC over `message` as a single input.
    pub fn compute(&self, message: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_bytes();
        match self.algorithm {
            HashAlgorithm::Sha1 => hmac_bytes::<Hmac<Sha1>>(key, message),
            HashAlgorithm::Sha256 => hmac_bytes::<Hmac<Sha256>>(key, message),
            HashAlgorithm::Sha384 => hmac_bytes::<Hmac<Sha384>>(key, message),
            HashAlgorithm::Sha512 => hmac_bytes::<Hmac<Sha512>>(key, message),
        }
    }

    /// Compute the MAC and render it as lowercase hex for embedding in a token.
    pub fn compute_hex(&self, message: &[u8]) -> Result<String> {
        Ok(hex::encode(self.compute(message)?))
    }

    /// Check an embedded hex tag against the MAC of `message`.
    ///
    /// The comparison runs over the hex text itself, so any change to the
    /// tag (including case) is a mismatch, and it does not short-circuit on
    /// the first differing byte.
    pub fn verify_hex(&self, message: &[u8], tag_hex: &str) -> Result<bool> {
        let expected = self.compute_hex(message)?;
        Ok(expected.as_bytes().ct_eq(tag_hex.as_bytes()).into())
    }
}

fn hmac_bytes<M: Mac + hmac::digest::KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key)
        .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
