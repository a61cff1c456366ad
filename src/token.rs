//! Token grammar shared by all signers.
//!
//! Tokens are `::`-separated text fields:
//!
//!   plain:      <payload>::<hex-mac>
//!   timed:      <payload>::<hex-mac>::<deadline>
//!   structured: <base64url-json>::<hex-mac>::<deadline>
//!
//! The deadline is a signed Unix timestamp in seconds, written as a decimal
//! string and then base58-encoded (Bitcoin alphabet). The MAC always covers
//! the decimal text, never the base58 form.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::{Result, SignerError};
use crate::types::DELIMITER;

/// Field count of a plain token.
pub const PLAIN_FIELDS: usize = 2;

/// Field count of timed and structured tokens.
pub const TIMED_FIELDS: usize = 3;

/// A deadline as embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// Decimal text the MAC was computed over.
    pub text: String,
}

impl Deadline {
    pub fn new(timestamp: i64) -> Self {
        Deadline {
            timestamp,
            text: timestamp.to_string(),
        }
    }

    /// Deadline `ttl` after `now`, saturating at `i64::MAX`.
    pub fn after(now: i64, ttl: Duration) -> Self {
        let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Deadline::new(now.saturating_add(secs))
    }

    /// Base58 form of the decimal text.
    #[must_use]
    pub fn encode(&self) -> String {
        bs58::encode(self.text.as_bytes()).into_string()
    }

    /// Decode an embedded deadline field. `token` is only used for error reporting.
    pub fn decode(field: &str, token: &str) -> Result<Self> {
        let raw = bs58::decode(field)
            .into_vec()
            .map_err(|e| SignerError::bad_data_with(token, e))?;
        let text = String::from_utf8(raw).map_err(|e| SignerError::bad_data_with(token, e))?;
        let timestamp = text
            .parse::<i64>()
            .map_err(|e| SignerError::bad_data_with(token, e))?;
        Ok(Deadline { timestamp, text })
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.timestamp
    }

    /// Fail with `DataExpired` once `now` is past the deadline.
    pub fn check(&self, now: i64) -> Result<()> {
        if self.is_expired(now) {
            return Err(SignerError::DataExpired {
                deadline: self.timestamp,
                now,
            });
        }
        Ok(())
    }
}

/// Split `token` on the delimiter, requiring exactly `expected` fields.
///
/// Fields are taken from the right: the MAC and deadline never contain
/// `:`, so a payload ending in a single `:` still parses.
pub fn split_fields(token: &str, expected: usize) -> Result<Vec<&str>> {
    let mut fields: Vec<&str> = token.rsplitn(expected, DELIMITER).collect();
    fields.reverse();
    let payload_clean = fields.first().is_some_and(|f| !f.contains(DELIMITER));
    if fields.len() != expected || !payload_clean {
        return Err(SignerError::bad_data(token));
    }
    Ok(fields)
}

/// Join fields with the delimiter.
#[must_use]
pub fn join_fields(fields: &[&str]) -> String {
    fields.join(DELIMITER)
}

/// Current Unix time in seconds. Clocks set before the epoch yield
/// negative values instead of failing.
pub fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}

/// Unverified view of a token's fields, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenParts {
    pub payload: String,
    pub mac_hex: String,
    /// Present for timed and structured tokens.
    pub deadline: Option<i64>,
}

/// Split a token of any variant without checking its MAC or deadline.
pub fn inspect(token: &str) -> Result<TokenParts> {
    let fields =
        split_fields(token, TIMED_FIELDS).or_else(|_| split_fields(token, PLAIN_FIELDS))?;
    match fields.as_slice() {
        [payload, mac] => Ok(TokenParts {
            payload: (*payload).to_string(),
            mac_hex: (*mac).to_string(),
            deadline: None,
        }),
        [payload, mac, deadline] => Ok(TokenParts {
            payload: (*payload).to_string(),
            mac_hex: (*mac).to_string(),
            deadline: Some(Deadline::decode(deadline, token)?.timestamp),
        }),
        _ => Err(SignerError::bad_data(token)),
    }
}
