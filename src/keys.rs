//! Secret key generation and loading.

use std::path::Path;

use rand::RngCore;
use zeroize::Zeroizing;

use crate::types::SecretKey;

/// Default generated key length in bytes.
pub const DEFAULT_KEY_LEN: usize = 32;

/// Shortest key `generate_secret_key` will produce.
pub const MIN_KEY_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("hex key file is not valid UTF-8")]
    NotUtf8,

    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate `len` bytes of key material from the operating system RNG.
pub fn generate_secret_key(len: usize) -> Result<SecretKey, KeyError> {
    if len < MIN_KEY_LEN {
        return Err(KeyError::TooShort {
            expected: MIN_KEY_LEN,
            actual: len,
        });
    }
    let mut buf = Zeroizing::new(vec![0u8; len]);
    rand::rngs::OsRng.fill_bytes(&mut buf);
    Ok(SecretKey::new(buf.as_slice()))
}

/// Parse a hex-encoded key, ignoring surrounding whitespace.
pub fn parse_hex_key(s: &str) -> Result<SecretKey, KeyError> {
    let bytes = Zeroizing::new(hex::decode(s.trim())?);
    if bytes.is_empty() {
        return Err(KeyError::TooShort {
            expected: 1,
            actual: 0,
        });
    }
    Ok(SecretKey::new(bytes.as_slice()))
}

/// Read key bytes from a file, optionally hex-decoding.
pub fn load_key_file(path: impl AsRef<Path>, hex_encoded: bool) -> Result<SecretKey, KeyError> {
    let raw = Zeroizing::new(std::fs::read(path)?);
    if hex_encoded {
        let text = std::str::from_utf8(&raw).map_err(|_| KeyError::NotUtf8)?;
        return parse_hex_key(text);
    }
    if raw.is_empty() {
        return Err(KeyError::TooShort {
            expected: 1,
            actual: 0,
        });
    }
    Ok(SecretKey::new(raw.as_slice()))
}
