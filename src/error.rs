use thiserror::Error;

/// Boxed underlying failure carried by [`SignerError::BadData`].
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("data length {length} too short")]
    DataTooShort { length: usize },

    #[error("invalid data {data:?}{}", cause_suffix(.cause))]
    BadData {
        data: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("data expired at {deadline}, current time is {now}")]
    DataExpired { deadline: i64, now: i64 },

    #[error("invalid MAC key: {0}")]
    InvalidKey(String),

    /// The structured payload authenticated correctly but could not be
    /// decoded into the requested type.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

fn cause_suffix(cause: &Option<Cause>) -> String {
    match cause {
        Some(e) => format!(": {e}"),
        None => String::new(),
    }
}

impl SignerError {
    pub(crate) fn bad_data(data: impl Into<String>) -> Self {
        SignerError::BadData {
            data: data.into(),
            cause: None,
        }
    }

    pub(crate) fn bad_data_with(data: impl Into<String>, cause: impl Into<Cause>) -> Self {
        SignerError::BadData {
            data: data.into(),
            cause: Some(cause.into()),
        }
    }

    /// True for a well-formed token whose deadline has passed.
    pub fn is_expired(&self) -> bool {
        matches!(self, SignerError::DataExpired { .. })
    }

    /// True for malformed, forged or otherwise unverifiable input.
    pub fn is_bad_data(&self) -> bool {
        matches!(self, SignerError::BadData { .. })
    }
}

pub type Result<T> = std::result::Result<T, SignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = SignerError::DataTooShort { length: 0 };
        assert_eq!(e.to_string(), "data length 0 too short");

        let e = SignerError::DataExpired {
            deadline: 1000,
            now: 2000,
        };
        assert_eq!(e.to_string(), "data expired at 1000, current time is 2000");
        assert!(e.is_expired());
        assert!(!e.is_bad_data());

        let e = SignerError::InvalidKey("invalid length".into());
        assert_eq!(e.to_string(), "invalid MAC key: invalid length");
    }

    #[test]
    fn test_bad_data_cause_is_source() {
        use std::error::Error as _;

        let plain = SignerError::bad_data("abc");
        assert_eq!(plain.to_string(), "invalid data \"abc\"");
        assert!(plain.source().is_none());

        let with_cause = SignerError::bad_data_with("abc", "not a number");
        assert_eq!(with_cause.to_string(), "invalid data \"abc\": not a number");
        assert!(with_cause.source().is_some());
        assert!(with_cause.is_bad_data());
    }
}
