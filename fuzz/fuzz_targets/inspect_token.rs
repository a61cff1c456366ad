#![no_main]
use libfuzzer_sys::fuzz_target;
use signet::token::inspect;

/// Exercises all fields of a successfully inspected token.
fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        if let Ok(parts) = inspect(token) {
            let _ = parts.payload.len();
            let _ = parts.mac_hex.len();
            let _ = parts.deadline;
            // JSON serialization should not panic
            let _ = serde_json::to_string(&parts);
        }
    }
});
