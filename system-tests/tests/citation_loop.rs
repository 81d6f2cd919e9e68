// system-tests/tests/citation_loop.rs
// ============================================================================
// Module: Citation Self-Correction Tests
// Description: Cite-Before-Act enforcement and the bounded correction loop.
// ============================================================================
//! ## Overview
//! Feeds the jurist states without valid citations and checks the
//! self-correction loop back to the vanguard, bounded by the iteration cap.

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

use verdant_core::AgentId;
use verdant_core::AnomalyRecord;
use verdant_core::BuildingId;
use verdant_core::ExecutionState;
use verdant_core::IdentityStore;
use verdant_core::Phase;
use verdant_core::RuntimeConfig;
use verdant_core::Severity;
use verdant_core::StepContext;
use verdant_core::StepResult;
use verdant_core::ThreadId;
use verdant_core::Timestamp;
use verdant_core::runtime::MAX_ITERATIONS;
use verdant_core::runtime::Route;
use verdant_core::runtime::jurist_step;
use verdant_core::runtime::route_after_jurist;

/// Builds a state carrying anomalies but no citations.
fn uncited_state(iteration_count: u32) -> ExecutionState {
    let mut state = ExecutionState::default();
    state.iteration_count = iteration_count;
    state.anomalies.push(AnomalyRecord {
        kind: "energy_spike".to_string(),
        building_id: BuildingId::new("HQ-01"),
        severity: Severity::High,
        metric: "+30.0% above average".to_string(),
        peak: 200.0,
        avg: 140.0,
        anomaly_count: 3,
        detected_at: Timestamp::new("2026-01-01T00:00:00Z"),
    });
    state
}

// ============================================================================
// SECTION: Citation Failure
// ============================================================================

/// Tests the jurist refuses to act without citations.
#[test]
fn test_jurist_flags_citation_failure() {
    let keys = tempfile::tempdir().unwrap();
    let identity = IdentityStore::new(keys.path());
    let adapters = common::adapters_with_telemetry(Arc::new(common::FlatTelemetry));
    let clock = common::fixed_clock();
    let config = RuntimeConfig::default();
    let thread_id = ThreadId::new("uncited");
    let ctx = StepContext {
        thread_id: &thread_id,
        adapters: &adapters,
        identity: &identity,
        clock: clock.as_ref(),
        config: &config,
        human_response: None,
    };

    let state = uncited_state(1);
    let result = jurist_step(&state, &ctx).unwrap();
    let StepResult::Delta(delta) = result else {
        panic!("jurist returned a non-delta result");
    };

    assert_eq!(delta.current_phase, Some(Phase::CitationFailure));
    assert!(delta.compliance_report.is_none());
    assert!(delta.decision_traces.is_empty());
    assert_eq!(delta.error_log.len(), 1);
    assert_eq!(delta.ui_events.len(), 1);
}

/// Tests the loop routes back to the vanguard until the cap, then ends.
#[test]
fn test_loop_is_bounded_by_iteration_cap() {
    for iteration in 1..MAX_ITERATIONS {
        let mut state = uncited_state(iteration);
        state.current_phase = Phase::CitationFailure;
        assert_eq!(route_after_jurist(&state), Route::Node(AgentId::Vanguard));
    }

    let mut state = uncited_state(MAX_ITERATIONS);
    state.current_phase = Phase::CitationFailure;
    assert_eq!(route_after_jurist(&state), Route::End);
}

/// Tests repeated jurist rejections accumulate the error log.
#[test]
fn test_repeated_failures_accumulate_errors() {
    let keys = tempfile::tempdir().unwrap();
    let identity = IdentityStore::new(keys.path());
    let adapters = common::adapters_with_telemetry(Arc::new(common::FlatTelemetry));
    let clock = common::fixed_clock();
    let config = RuntimeConfig::default();
    let thread_id = ThreadId::new("looped");

    let mut state = uncited_state(0);
    for iteration in 1..=MAX_ITERATIONS {
        state.iteration_count = iteration;
        let ctx = StepContext {
            thread_id: &thread_id,
            adapters: &adapters,
            identity: &identity,
            clock: clock.as_ref(),
            config: &config,
            human_response: None,
        };
        let StepResult::Delta(delta) = jurist_step(&state, &ctx).unwrap() else {
            panic!("jurist returned a non-delta result");
        };
        state.apply(delta);
    }

    assert_eq!(state.current_phase, Phase::CitationFailure);
    assert_eq!(state.error_log.len(), usize::try_from(MAX_ITERATIONS).unwrap());
    assert_eq!(route_after_jurist(&state), Route::End);
}
