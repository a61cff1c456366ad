#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Regression tests that verify token construction against stored test vectors.
//! If any test here fails, it means the wire format has changed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use signet::keys::parse_hex_key;
use signet::{HashAlgorithm, SecretKey, Serializer, Signer, TimedSigner};

/// A timestamp inside every vector's validity window.
const VALID_TIME: i64 = 1900000000;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TokenData {
    user_id: u64,
    user_name: String,
    #[serde(rename = "IsVIP")]
    is_vip: bool,
    user_level: Vec<i32>,
}

/// Load test vectors from testdata/vectors.json.
fn load_vectors() -> serde_json::Value {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/vectors.json");
    let data = std::fs::read_to_string(path).expect("failed to read test vectors file");
    serde_json::from_str(&data).expect("failed to parse test vectors JSON")
}

/// Find a vector by name.
fn find_vector(vectors: &serde_json::Value, name: &str) -> serde_json::Value {
    vectors["vectors"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["name"].as_str().unwrap() == name)
        .unwrap_or_else(|| panic!("test vector '{name}' not found"))
        .clone()
}

fn vector_key(vectors: &serde_json::Value) -> SecretKey {
    parse_hex_key(vectors["key_hex"].as_str().unwrap()).unwrap()
}

fn algorithm(v: &serde_json::Value) -> HashAlgorithm {
    v["algorithm"].as_str().unwrap().parse().unwrap()
}

fn ttl(v: &serde_json::Value) -> Duration {
    let signed_at = v["signed_at"].as_i64().unwrap();
    let expires_at = v["expires_at"].as_i64().unwrap();
    Duration::from_secs((expires_at - signed_at) as u64)
}

// === Plain ===

fn check_plain(name: &str) {
    let vectors = load_vectors();
    let v = find_vector(&vectors, name);
    let signer = Signer::with_algorithm(vector_key(&vectors), algorithm(&v));

    let token = signer.sign(v["payload"].as_str().unwrap()).unwrap();
    assert_eq!(token, v["token"].as_str().unwrap(), "{name} wire format mismatch");
    assert_eq!(signer.verify(&token).unwrap(), v["payload"].as_str().unwrap());
}

#[test]
fn test_vector_plain_sha1() {
    check_plain("plain_sha1");
}

#[test]
fn test_vector_plain_sha256() {
    check_plain("plain_sha256");
}

// === Timed ===

fn check_timed(name: &str) {
    let vectors = load_vectors();
    let v = find_vector(&vectors, name);
    let signer = TimedSigner::with_algorithm(vector_key(&vectors), algorithm(&v));
    let payload = v["payload"].as_str().unwrap();

    let token = signer
        .sign_at(payload, ttl(&v), v["signed_at"].as_i64().unwrap())
        .unwrap();
    assert_eq!(token, v["token"].as_str().unwrap(), "{name} wire format mismatch");

    let stored = v["token"].as_str().unwrap();
    assert_eq!(signer.verify_at(stored, VALID_TIME).unwrap(), payload);

    let after = v["expires_at"].as_i64().unwrap() + 1;
    assert!(signer.verify_at(stored, after).unwrap_err().is_expired());
}

#[test]
fn test_vector_timed_sha1() {
    check_timed("timed_sha1");
}

#[test]
fn test_vector_timed_sha512() {
    check_timed("timed_sha512");
}

// === Structured ===

fn check_structured(name: &str) {
    let vectors = load_vectors();
    let v = find_vector(&vectors, name);
    let serializer = Serializer::with_algorithm(vector_key(&vectors), algorithm(&v))
        .with_salt(v["salt"].as_str().unwrap());
    let value: TokenData = serde_json::from_value(v["value"].clone()).unwrap();

    let token = serializer
        .dump_at(&value, ttl(&v), v["signed_at"].as_i64().unwrap())
        .unwrap();
    assert_eq!(token, v["token"].as_str().unwrap(), "{name} wire format mismatch");

    let loaded: TokenData = serializer
        .load_at(v["token"].as_str().unwrap(), VALID_TIME)
        .unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn test_vector_structured_sha1_salted() {
    check_structured("structured_sha1");
}

#[test]
fn test_vector_structured_sha256_unsalted() {
    check_structured("structured_sha256");
}

#[test]
fn test_vector_variants_do_not_cross_verify() {
    let vectors = load_vectors();
    let key = vector_key(&vectors);
    let timed = find_vector(&vectors, "timed_sha1");
    let structured = find_vector(&vectors, "structured_sha1");

    let plain = Signer::new(key.clone());
    assert!(plain.verify(timed["token"].as_str().unwrap()).is_err());

    let timed_signer = TimedSigner::new(key);
    assert!(timed_signer
        .verify_at(structured["token"].as_str().unwrap(), VALID_TIME)
        .unwrap_err()
        .is_bad_data());
}
