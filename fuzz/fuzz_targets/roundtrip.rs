#![no_main]
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use signet::{Serializer, Signer, TimedSigner};

const NOW: i64 = 1_700_000_000;
const TTL: Duration = Duration::from_secs(60);

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = std::str::from_utf8(data) else {
        return;
    };

    // Any payload the signers accept must verify back to itself.
    let signer = Signer::new("fuzz-key");
    if let Ok(token) = signer.sign(payload) {
        assert_eq!(signer.verify(&token).unwrap(), payload);
    }

    let timed = TimedSigner::new("fuzz-key");
    if let Ok(token) = timed.sign_at(payload, TTL, NOW) {
        assert_eq!(timed.verify_at(&token, NOW).unwrap(), payload);
    }

    // The serializer carries any string, delimiters included.
    let serializer = Serializer::new("fuzz-key").with_salt("fuzz");
    let token = serializer.dump_at(payload, TTL, NOW).unwrap();
    assert_eq!(serializer.load_at::<String>(&token, NOW).unwrap(), payload);
});
