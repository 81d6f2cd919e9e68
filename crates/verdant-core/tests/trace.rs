// crates/verdant-core/tests/trace.rs
// ============================================================================
// Module: Decision Trace Tests
// Description: Tests for signing, verification, and tamper detection.
// ============================================================================
//! ## Overview
//! Validates the sign/verify round trip and that any mutation of a signed
//! trace flips verification to false.

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

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde_json::json;
use verdant_core::AgentId;
use verdant_core::DecisionTrace;
use verdant_core::Timestamp;
use verdant_core::sign_trace;
use verdant_core::verify_trace;

/// Builds a signed trace and its key for mutation tests.
fn signed_trace() -> (DecisionTrace, SigningKey) {
    let key = SigningKey::generate(&mut OsRng);
    let trace = sign_trace(
        AgentId::Vanguard,
        json!({"action": "anomaly_scan", "anomalies_found": 2}),
        Timestamp::new("2026-01-01T00:00:00Z"),
        &key,
    )
    .unwrap();
    (trace, key)
}

// ============================================================================
// SECTION: Round Trip
// ============================================================================

/// Tests a signed trace verifies against its public key.
#[test]
fn test_sign_then_verify() {
    let (trace, key) = signed_trace();
    assert_eq!(trace.agent_id, "vanguard");
    assert_eq!(trace.payload_hash.len(), 64);
    assert!(verify_trace(&trace, &key.verifying_key()));
}

/// Tests verification against a different key fails.
#[test]
fn test_wrong_key_fails() {
    let (trace, _key) = signed_trace();
    let other = SigningKey::generate(&mut OsRng);
    assert!(!verify_trace(&trace, &other.verifying_key()));
}

// ============================================================================
// SECTION: Tamper Detection
// ============================================================================

/// Tests mutating the decision payload flips verification to false.
#[test]
fn test_tampered_decision_fails() {
    let (mut trace, key) = signed_trace();
    trace.decision = json!({"action": "anomaly_scan", "anomalies_found": 99});
    assert!(!verify_trace(&trace, &key.verifying_key()));
}

/// Tests mutating the agent id flips verification to false.
#[test]
fn test_tampered_agent_id_fails() {
    let (mut trace, key) = signed_trace();
    trace.agent_id = "jurist".to_string();
    assert!(!verify_trace(&trace, &key.verifying_key()));
}

/// Tests mutating the timestamp flips verification to false.
#[test]
fn test_tampered_timestamp_fails() {
    let (mut trace, key) = signed_trace();
    trace.timestamp = Timestamp::new("2026-01-01T00:00:01Z");
    assert!(!verify_trace(&trace, &key.verifying_key()));
}

/// Tests mutating the payload hash flips verification to false.
#[test]
fn test_tampered_hash_fails() {
    let (mut trace, key) = signed_trace();
    trace.payload_hash = "0".repeat(64);
    assert!(!verify_trace(&trace, &key.verifying_key()));
}

/// Tests mutating the signature flips verification to false.
#[test]
fn test_tampered_signature_fails() {
    let (mut trace, key) = signed_trace();
    let mut bytes = trace.signature.into_bytes();
    bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
    trace.signature = String::from_utf8(bytes).unwrap();
    assert!(!verify_trace(&trace, &key.verifying_key()));
}

/// Tests malformed base64 signatures fail without raising.
#[test]
fn test_malformed_signature_fails() {
    let (mut trace, key) = signed_trace();
    trace.signature = "not base64 at all!".to_string();
    assert!(!verify_trace(&trace, &key.verifying_key()));
}
