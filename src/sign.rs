//! Plain signer: `<payload>::<hex-mac>`, no expiry.

use crate::error::{Result, SignerError};
use crate::mac::MacEngine;
use crate::token::{join_fields, split_fields, PLAIN_FIELDS};
use crate::types::{HashAlgorithm, SecretKey, DELIMITER};

/// Signs and verifies strings with an HMAC and no expiry.
#[derive(Debug, Clone)]
pub struct Signer {
    mac: MacEngine,
}

impl Signer {
    /// Signer using HMAC-SHA1.
    pub fn new(key: impl Into<SecretKey>) -> Self {
        Self::with_algorithm(key, HashAlgorithm::default())
    }

    pub fn with_algorithm(key: impl Into<SecretKey>, algorithm: HashAlgorithm) -> Self {
        Signer {
            mac: MacEngine::new(key.into(), algorithm),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.mac.algorithm()
    }

    /// Sign `payload`, returning `payload::hex(mac)`.
    pub fn sign(&self, payload: &str) -> Result<String> {
        check_payload(payload)?;
        let tag = self.mac.compute_hex(payload.as_bytes())?;
        Ok(join_fields(&[payload, tag.as_str()]))
    }

    /// Verify a token produced by [`Signer::sign`] and return its payload.
    pub fn verify(&self, token: &str) -> Result<String> {
        let fields = split_fields(token, PLAIN_FIELDS)?;
        let [payload, tag] = fields.as_slice() else {
            return Err(SignerError::bad_data(token));
        };
        if !self.mac.verify_hex(payload.as_bytes(), tag)? {
            return Err(SignerError::bad_data(token));
        }
        Ok((*payload).to_string())
    }
}

/// Reject payloads the token grammar cannot carry.
pub(crate) fn check_payload(payload: &str) -> Result<()> {
    if payload.is_empty() {
        return Err(SignerError::DataTooShort {
            length: payload.len(),
        });
    }
    if payload.contains(DELIMITER) {
        return Err(SignerError::bad_data_with(
            payload,
            format!("payload contains the reserved delimiter {DELIMITER:?}"),
        ));
    }
    Ok(())
}
