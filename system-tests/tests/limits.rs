// system-tests/tests/limits.rs
// ============================================================================
// Module: Runtime Limit Tests
// Description: Cancellation, recursion cap, and step time budgets.
// ============================================================================
//! ## Overview
//! Validates the terminal dispositions: cooperative cancellation, the
//! per-run dispatch cap, and the optional per-step wall-clock budget.

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

use std::sync::Arc;

use verdant_core::BuildingId;
use verdant_core::CheckpointStore;
use verdant_core::IdentityStore;
use verdant_core::InMemoryCheckpointStore;
use verdant_core::Orchestrator;
use verdant_core::Phase;
use verdant_core::RuntimeConfig;
use verdant_core::RunStatus;
use verdant_core::ThreadId;

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Tests cancelling a parked thread persists the cancelled phase.
#[test]
fn test_cancel_parked_thread() {
    let harness = common::harness();
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);
    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("cancel")))
        .unwrap();
    assert!(harness.orchestrator.status(&thread_id).unwrap().is_interrupted);

    harness.orchestrator.cancel(&thread_id).unwrap();

    let checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
    assert_eq!(checkpoint.state.current_phase, Phase::Cancelled);
    assert_eq!(checkpoint.status, RunStatus::Cancelled);
}

/// Tests cancelling a completed thread changes nothing.
#[test]
fn test_cancel_completed_thread_is_noop() {
    let harness = common::flat_harness();
    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("done")))
        .unwrap();

    harness.orchestrator.cancel(&thread_id).unwrap();

    let checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
    assert_eq!(checkpoint.state.current_phase, Phase::VanguardComplete);
    assert_eq!(checkpoint.status, RunStatus::Completed);
}

// ============================================================================
// SECTION: Recursion Cap
// ============================================================================

/// Tests the dispatch cap terminates the thread hard.
#[test]
fn test_recursion_cap_terminates() {
    let config = RuntimeConfig {
        recursion_limit: 2,
        ..RuntimeConfig::default()
    };
    let harness = common::harness_with_config(config);
    harness.simulator.inject(&BuildingId::new("HQ-01"), 0.8);

    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("capped")))
        .unwrap();

    let checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
    assert_eq!(checkpoint.state.current_phase, Phase::RecursionExceeded);
    assert_eq!(checkpoint.status, RunStatus::Failed);
    // Only two dispatches ran before the cap.
    assert_eq!(harness.orchestrator.dispatch_log(&thread_id).unwrap().len(), 2);
}

// ============================================================================
// SECTION: Step Budget
// ============================================================================

/// Tests an over-budget step surfaces as a step failure.
#[test]
fn test_step_budget_failure() {
    let keys = tempfile::tempdir().unwrap();
    let adapters = common::adapters_with_telemetry(Arc::new(common::SlowTelemetry {
        delay_ms: 50,
    }));
    let store = InMemoryCheckpointStore::new();
    let orchestrator = Orchestrator::new(
        store.clone(),
        Arc::new(IdentityStore::new(keys.path())),
        adapters,
        common::fixed_clock(),
        RuntimeConfig {
            step_timeout_ms: Some(5),
            ..RuntimeConfig::default()
        },
    )
    .unwrap();

    let thread_id =
        orchestrator.start(common::initial_state(), Some(ThreadId::new("slow"))).unwrap();

    let checkpoint = store.latest(&thread_id).unwrap().unwrap();
    assert_eq!(checkpoint.state.current_phase, Phase::Error);
    assert_eq!(checkpoint.status, RunStatus::Failed);
    assert!(checkpoint.state.error_log.iter().any(|line| line.contains("time budget")));
}
