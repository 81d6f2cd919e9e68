// system-tests/tests/rejection_loop.rs
// ============================================================================
// Module: Rejection Loop System Tests
// Description: End-to-end governor rejection and ROI adjustment loop.
// ============================================================================
//! ## Overview
//! Drives a thread into the governor, rejects with an adjustment, and checks
//! the architect re-simulates with a tightened estimate before the thread
//! re-reaches the breakpoint.

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

use verdant_core::BuildingId;
use verdant_core::CheckpointStore;
use verdant_core::HumanResponse;
use verdant_core::Phase;
use verdant_core::ThreadId;

// ============================================================================
// SECTION: Rejection Loop
// ============================================================================

/// Tests a rejection tightens the ROI and re-reaches the governor.
#[test]
fn test_rejection_drives_adjustment_loop() {
    let harness = common::harness();
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);

    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("reject")))
        .unwrap();

    let first = harness.store.latest(&thread_id).unwrap().unwrap();
    let first_savings = first.state.simulation_result.as_ref().unwrap().monthly_savings_usd;
    assert!(first_savings > 0.0);

    harness
        .orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: false,
                roi_adjustment: 0.8,
            },
        )
        .unwrap();

    // The thread is parked at the governor again with a tightened estimate.
    let second = harness.store.latest(&thread_id).unwrap().unwrap();
    assert!(second.pending_interrupt.is_some());
    let state = &second.state;
    assert_eq!(state.governor_approval, Some(false));

    let simulation = state.simulation_result.as_ref().unwrap();
    // The operator adjustment of 0.8 is tightened by the architect's 0.9.
    assert!((simulation.roi_adjustment - 0.72).abs() < 1e-9);
    assert!(simulation.monthly_savings_usd < first_savings);

    // The rejection decision was signed before re-simulation.
    let governor_traces = state
        .decision_traces
        .iter()
        .filter(|trace| trace.agent_id == "governor")
        .count();
    assert_eq!(governor_traces, 1);

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

    let done = harness.store.latest(&thread_id).unwrap().unwrap();
    assert_eq!(done.state.current_phase, Phase::Complete);
    // Detector, jurist, two architect rounds, two governor decisions.
    assert_eq!(done.state.decision_traces.len(), 6);

    let traces = harness.orchestrator.traces(&thread_id).unwrap();
    assert!(traces.iter().all(|trace| trace.verified));
}

// ============================================================================
// SECTION: Resume Validation
// ============================================================================

/// Tests out-of-band adjustments are rejected before touching the thread.
#[test]
fn test_out_of_band_adjustment_rejected() {
    let harness = common::harness();
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);
    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("band")))
        .unwrap();

    let err = harness
        .orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: true,
                roi_adjustment: 2.0,
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("outside"));

    // The thread is still parked and can be resumed properly.
    assert!(harness.orchestrator.status(&thread_id).unwrap().is_interrupted);
}

/// Tests resuming a thread without a pending interrupt fails.
#[test]
fn test_resume_without_interrupt_fails() {
    let harness = common::flat_harness();
    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("no-interrupt")))
        .unwrap();

    let err = harness
        .orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: true,
                roi_adjustment: 1.0,
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("no pending interrupt"));
}
