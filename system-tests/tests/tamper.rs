// system-tests/tests/tamper.rs
// ============================================================================
// Module: Tamper Detection System Tests
// Description: Trace verification flags over tampered checkpoint history.
// ============================================================================
//! ## Overview
//! Completes a thread, tampers with one persisted trace, and checks that only
//! that entry loses its verification flag.

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

mod common;

use serde_json::json;
use verdant_core::BuildingId;
use verdant_core::CheckpointStore;
use verdant_core::HumanResponse;
use verdant_core::ThreadId;

// ============================================================================
// SECTION: Tamper Detection
// ============================================================================

/// Tests a single tampered trace is flagged while others stay verified.
#[test]
fn test_single_tampered_trace_is_flagged() {
    let harness = common::harness();
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);

    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("tamper")))
        .unwrap();
    harness
        .orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: true,
                roi_adjustment: 1.0,
            },
        )
        .unwrap();

    let before = harness.orchestrator.traces(&thread_id).unwrap();
    assert_eq!(before.len(), 4);
    assert!(before.iter().all(|trace| trace.verified));

    // Tamper with the jurist decision inside the persisted history.
    let mut checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
    checkpoint.state.decision_traces[1].decision =
        json!({"action": "compliance_evaluation", "status": "non_compliant"});
    checkpoint.step_index += 1;
    harness.store.append(&thread_id, &checkpoint).unwrap();

    let after = harness.orchestrator.traces(&thread_id).unwrap();
    assert_eq!(after.len(), 4);
    assert!(after[0].verified);
    assert!(!after[1].verified);
    assert!(after[2].verified);
    assert!(after[3].verified);
}

/// Tests a trace claiming an unknown agent can never verify.
#[test]
fn test_unknown_agent_never_verifies() {
    let harness = common::harness();
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);

    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("unknown-agent")))
        .unwrap();

    let mut checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
    checkpoint.state.decision_traces[0].agent_id = "intruder".to_string();
    checkpoint.step_index += 1;
    harness.store.append(&thread_id, &checkpoint).unwrap();

    let traces = harness.orchestrator.traces(&thread_id).unwrap();
    assert!(!traces[0].verified);
}
