// crates/verdant-core/tests/proptest_invariants.rs
// ============================================================================
// Module: Core Property-Based Tests
// Description: Property tests for hashing, signing, and merge invariants.
// ============================================================================
//! ## Overview
//! Property-based coverage of the trust substrate and the merge table across
//! wide input ranges.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use ed25519_dalek::SigningKey;
use proptest::prelude::*;
use serde_json::Value;
use verdant_core::AgentId;
use verdant_core::ExecutionState;
use verdant_core::StateDelta;
use verdant_core::Timestamp;
use verdant_core::canonical_json_bytes;
use verdant_core::sign_trace;
use verdant_core::verify_trace;

/// Strategy producing bounded-depth JSON values.
fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000_i64..1_000_000).prop_map(|v| Value::Number(v.into())),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|map| {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

proptest! {
    /// Canonical serialization is byte-stable under repetition.
    #[test]
    fn canonical_json_is_stable(value in json_value_strategy(3)) {
        let first = canonical_json_bytes(&value).unwrap();
        let second = canonical_json_bytes(&value).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every signed decision verifies against the signing key's public half.
    #[test]
    fn sign_verify_round_trip(value in json_value_strategy(2), seed in any::<[u8; 32]>()) {
        let key = SigningKey::from_bytes(&seed);
        let trace = sign_trace(
            AgentId::Architect,
            value,
            Timestamp::new("2026-01-01T00:00:00Z"),
            &key,
        )
        .unwrap();
        prop_assert!(verify_trace(&trace, &key.verifying_key()));
    }

    /// A trace signed by one key never verifies against another.
    #[test]
    fn cross_key_verification_fails(
        value in json_value_strategy(2),
        seed_a in any::<[u8; 32]>(),
        seed_b in any::<[u8; 32]>(),
    ) {
        prop_assume!(seed_a != seed_b);
        let key_a = SigningKey::from_bytes(&seed_a);
        let key_b = SigningKey::from_bytes(&seed_b);
        let trace = sign_trace(
            AgentId::Governor,
            value,
            Timestamp::new("2026-01-01T00:00:00Z"),
            &key_a,
        )
        .unwrap();
        prop_assert!(!verify_trace(&trace, &key_b.verifying_key()));
    }

    /// Merging preserves every append field as a prefix-extension of the old list.
    #[test]
    fn merge_append_fields_are_supersets(
        base in prop::collection::vec(".*", 0..8),
        extra in prop::collection::vec(".*", 0..8),
    ) {
        let mut state = ExecutionState::default();
        state.error_log = base.clone();
        state.apply(StateDelta {
            error_log: extra.clone(),
            ..StateDelta::default()
        });

        prop_assert_eq!(state.error_log.len(), base.len() + extra.len());
        prop_assert_eq!(&state.error_log[..base.len()], &base[..]);
        prop_assert_eq!(&state.error_log[base.len()..], &extra[..]);
    }
}
