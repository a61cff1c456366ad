#![no_main]
use libfuzzer_sys::fuzz_target;
use signet::{Serializer, Signer, TimedSigner};

const NOW: i64 = 1_700_000_000;

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    // Must never panic, and must never accept an unsigned token.
    assert!(Signer::new("fuzz-key").verify(token).is_err());
    assert!(TimedSigner::new("fuzz-key").verify_at(token, NOW).is_err());
    assert!(Serializer::new("fuzz-key")
        .load_at::<serde_json::Value>(token, NOW)
        .is_err());
});
