// crates/verdant-core/src/core/trace.rs
// ============================================================================
// Module: Verdant Decision Traces
// Description: Canonical signing and verification of agent decision records.
// Purpose: Produce tamper-evident Ed25519-signed traces of every decision.
// Dependencies: base64, ed25519-dalek, serde, crate::core::{hashing, identifiers, time}
// ============================================================================

//! ## Overview
//! Every autonomous decision produces a [`DecisionTrace`] carrying the decision
//! payload, a SHA-256 hash of its canonical JSON, and an Ed25519 signature
//! proving which agent produced it. The signable payload is exactly
//! `{agent_id, timestamp, decision}`; the hash and signature fields are
//! excluded. Verification is pure and deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use ed25519_dalek::Signature;
use ed25519_dalek::Signer;
use ed25519_dalek::SigningKey;
use ed25519_dalek::VerifyingKey;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::sha256_hex;
use crate::core::identifiers::AgentId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Decision Trace
// ============================================================================

/// Immutable, signed record of an agent decision.
///
/// # Invariants
/// - `payload_hash` is the SHA-256 hex of the canonical signable payload.
/// - `signature` is base64 of the raw Ed25519 signature over the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTrace {
    /// Identifier of the signing agent.
    pub agent_id: String,
    /// Decision timestamp.
    pub timestamp: Timestamp,
    /// Arbitrary JSON decision payload.
    pub decision: Value,
    /// SHA-256 hex of the canonical signable payload.
    pub payload_hash: String,
    /// Base64 Ed25519 signature over the canonical signable payload.
    pub signature: String,
}

/// Decision trace paired with its verification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedTrace {
    /// The underlying decision trace.
    #[serde(flatten)]
    pub trace: DecisionTrace,
    /// Whether the trace verified against the agent public key.
    pub verified: bool,
}

// ============================================================================
// SECTION: Signable Payload
// ============================================================================

/// Canonical signable subset of a decision trace.
///
/// # Invariants
/// - Field set is exactly `{agent_id, timestamp, decision}`.
#[derive(Serialize)]
struct SignablePayload<'a> {
    /// Identifier of the signing agent.
    agent_id: &'a str,
    /// Decision timestamp.
    timestamp: &'a str,
    /// Decision payload.
    decision: &'a Value,
}

/// Returns the canonical bytes of the signable payload.
fn signable_bytes(
    agent_id: &str,
    timestamp: &Timestamp,
    decision: &Value,
) -> Result<Vec<u8>, HashError> {
    canonical_json_bytes(&SignablePayload {
        agent_id,
        timestamp: timestamp.as_str(),
        decision,
    })
}

// ============================================================================
// SECTION: Signing
// ============================================================================

/// Creates a cryptographically signed decision trace.
///
/// # Errors
///
/// Returns [`HashError`] when the decision payload cannot be canonicalized.
pub fn sign_trace(
    agent: AgentId,
    decision: Value,
    timestamp: Timestamp,
    key: &SigningKey,
) -> Result<DecisionTrace, HashError> {
    let agent_id = agent.as_str().to_string();
    let canonical = signable_bytes(&agent_id, &timestamp, &decision)?;
    let payload_hash = sha256_hex(&canonical);
    let signature = Base64.encode(key.sign(&canonical).to_bytes());
    Ok(DecisionTrace {
        agent_id,
        timestamp,
        decision,
        payload_hash,
        signature,
    })
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Verifies the hash and signature on a decision trace.
///
/// Returns false, never errors, on hash mismatch, malformed base64, malformed
/// signature bytes, or signature failure. Given the same trace and key the
/// result is deterministic.
#[must_use]
pub fn verify_trace(trace: &DecisionTrace, key: &VerifyingKey) -> bool {
    let Ok(canonical) = signable_bytes(&trace.agent_id, &trace.timestamp, &trace.decision) else {
        return false;
    };

    if sha256_hex(&canonical) != trace.payload_hash {
        return false;
    }

    let Ok(sig_bytes) = Base64.decode(&trace.signature) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    key.verify_strict(&canonical, &signature).is_ok()
}
