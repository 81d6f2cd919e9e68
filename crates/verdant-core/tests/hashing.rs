// crates/verdant-core/tests/hashing.rs
// ============================================================================
// Module: Hashing Tests
// Description: Tests for canonical JSON hashing and digest helpers.
// ============================================================================
//! ## Overview
//! Validates deterministic hashing using RFC 8785 canonicalization.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::json;
use verdant_core::canonical_json_bytes;
use verdant_core::is_hex_digest;
use verdant_core::sha256_hex;
use verdant_core::sha256_hex_canonical;

// ============================================================================
// SECTION: Canonical Hashing
// ============================================================================

/// Tests canonical json hash is independent of key order.
#[test]
fn test_canonical_json_hash_ignores_key_order() {
    let value_a = json!({"b": 1, "a": 2});
    let value_b = json!({"a": 2, "b": 1});

    let hash_a = sha256_hex_canonical(&value_a).unwrap();
    let hash_b = sha256_hex_canonical(&value_b).unwrap();

    assert_eq!(hash_a, hash_b);
}

/// Tests canonical serialization is stable under repetition.
#[test]
fn test_canonical_bytes_are_stable() {
    let value = json!({"nested": {"z": [1, 2, 3], "a": "text"}, "top": true});

    let first = canonical_json_bytes(&value).unwrap();
    let second = canonical_json_bytes(&value).unwrap();

    assert_eq!(first, second);
}

/// Tests digests are 64 lowercase hex chars.
#[test]
fn test_digest_shape() {
    let digest = sha256_hex(b"verdant");
    assert_eq!(digest.len(), 64);
    assert!(is_hex_digest(&digest));
}

/// Tests the hex digest validator rejects malformed values.
#[test]
fn test_hex_digest_validation() {
    assert!(!is_hex_digest(""));
    assert!(!is_hex_digest("abc123"));
    assert!(!is_hex_digest(&"Z".repeat(64)));
    assert!(!is_hex_digest(&"A".repeat(64)));
    assert!(is_hex_digest(&"a1".repeat(32)));
}

/// Tests distinct payloads produce distinct digests.
#[test]
fn test_distinct_payloads_distinct_digests() {
    let hash_a = sha256_hex_canonical(&json!({"v": 1})).unwrap();
    let hash_b = sha256_hex_canonical(&json!({"v": 2})).unwrap();
    assert_ne!(hash_a, hash_b);
}
