//! Signet: tamper-evident signed tokens.
//!
//! Tokens are `::`-separated strings carrying a payload and an HMAC
//! (SHA-1 by default, SHA-2 on request), optionally bound to an expiration
//! deadline. Three signers share one MAC engine:
//!
//! - [`Signer`]: `payload::mac`
//! - [`TimedSigner`]: `payload::mac::deadline`
//! - [`Serializer`]: any `serde` value, salted, with a deadline
//!
//! ```
//! use std::time::Duration;
//! use signet::{Signer, TimedSigner};
//!
//! let signer = Signer::new("secret-key");
//! let token = signer.sign("user:42").unwrap();
//! assert_eq!(signer.verify(&token).unwrap(), "user:42");
//!
//! let timed = TimedSigner::new("secret-key");
//! let token = timed.sign("reset:42", Duration::from_secs(3600)).unwrap();
//! assert_eq!(timed.verify(&token).unwrap(), "reset:42");
//! ```

pub mod error;
pub mod keys;
pub mod mac;
pub mod serializer;
pub mod sign;
pub mod timed;
pub mod token;
pub mod types;

pub use error::{Result, SignerError};
pub use serializer::Serializer;
pub use sign::Signer;
pub use timed::TimedSigner;
pub use types::{HashAlgorithm, SecretKey};
