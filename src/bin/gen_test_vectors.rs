#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Generates deterministic token vectors for wire format regression testing.
//! Tokens expire in 2036. Run with: cargo run --bin gen_test_vectors > testdata/vectors.json

use std::time::Duration;

use serde::Serialize;

use signet::{HashAlgorithm, Serializer, Signer, TimedSigner};

/// Fixed signing time 2025-02-19 00:00:00 UTC.
const SIGNED_AT: i64 = 1739923200;
/// 2036-02-19 00:00:00 UTC.
const EXPIRES_AT: i64 = 2087078400;

const PAYLOAD: &str = "something information quite long";
const SALT: &str = "1739923200000000000";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TokenData {
    user_id: u64,
    user_name: String,
    #[serde(rename = "IsVIP")]
    is_vip: bool,
    user_level: Vec<i32>,
}

fn main() {
    let key: Vec<u8> = (0x00..=0x1f).collect();
    let ttl = Duration::from_secs((EXPIRES_AT - SIGNED_AT) as u64);
    let mut vectors: Vec<serde_json::Value> = Vec::new();

    for algorithm in [HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
        let token = Signer::with_algorithm(key.as_slice(), algorithm)
            .sign(PAYLOAD)
            .unwrap();
        vectors.push(serde_json::json!({
            "name": format!("plain_{algorithm}"),
            "type": "plain",
            "algorithm": algorithm.name(),
            "payload": PAYLOAD,
            "token": token,
        }));
    }

    for algorithm in [HashAlgorithm::Sha1, HashAlgorithm::Sha512] {
        let token = TimedSigner::with_algorithm(key.as_slice(), algorithm)
            .sign_at(PAYLOAD, ttl, SIGNED_AT)
            .unwrap();
        vectors.push(serde_json::json!({
            "name": format!("timed_{algorithm}"),
            "type": "timed",
            "algorithm": algorithm.name(),
            "payload": PAYLOAD,
            "signed_at": SIGNED_AT,
            "expires_at": EXPIRES_AT,
            "token": token,
        }));
    }

    let data = TokenData {
        user_id: 12580,
        user_name: "UserName".into(),
        is_vip: false,
        user_level: vec![1, 2, 3],
    };
    for (algorithm, salt) in [(HashAlgorithm::Sha1, SALT), (HashAlgorithm::Sha256, "")] {
        let token = Serializer::with_algorithm(key.as_slice(), algorithm)
            .with_salt(salt)
            .dump_at(&data, ttl, SIGNED_AT)
            .unwrap();
        vectors.push(serde_json::json!({
            "name": format!("structured_{algorithm}"),
            "type": "structured",
            "algorithm": algorithm.name(),
            "salt": salt,
            "value": data,
            "signed_at": SIGNED_AT,
            "expires_at": EXPIRES_AT,
            "token": token,
        }));
    }

    let output = serde_json::json!({
        "description": "signet token vectors; key is bytes 0x00..=0x1f",
        "key_hex": hex::encode(&key),
        "vectors": vectors,
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
