// system-tests/tests/resume_persistence.rs
// ============================================================================
// Module: Cross-Process Resume Tests
// Description: Suspend in one orchestrator, resume from a fresh one.
// ============================================================================
//! ## Overview
//! Suspends a thread at the governor over a durable SQLite store, rebuilds
//! the orchestrator from disk as a new process would, and resumes to an
//! identical completion.

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

use std::path::Path;
use std::sync::Arc;

use verdant_core::BuildingId;
use verdant_core::CheckpointStore;
use verdant_core::EventKind;
use verdant_core::HumanResponse;
use verdant_core::IdentityStore;
use verdant_core::Orchestrator;
use verdant_core::Phase;
use verdant_core::RuntimeConfig;
use verdant_core::ThreadId;
use verdant_store_sqlite::SqliteCheckpointStore;

/// Builds an orchestrator over the durable store, as one process would.
fn durable_orchestrator(
    db_path: &Path,
    keys_path: &Path,
    seed: u64,
) -> (
    Orchestrator<SqliteCheckpointStore>,
    Arc<verdant_adapters::TelemetrySimulator>,
) {
    let (adapters, simulator) = verdant_adapters::simulated_adapters(seed);
    let orchestrator = Orchestrator::new(
        SqliteCheckpointStore::open(db_path).unwrap(),
        Arc::new(IdentityStore::new(keys_path)),
        adapters,
        common::fixed_clock(),
        RuntimeConfig::default(),
    )
    .unwrap();
    (orchestrator, simulator)
}

// ============================================================================
// SECTION: Cross-Process Resume
// ============================================================================

/// Tests suspend in process A and resume in process B over the same store.
#[test]
fn test_suspend_restart_resume() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("verdant.db");
    let keys_path = dir.path().join("keys");
    let thread_id = ThreadId::new("durable");

    // Process A: run to the governor interrupt, then drop everything.
    {
        let (orchestrator, simulator) = durable_orchestrator(&db_path, &keys_path, 42);
        simulator.inject(&BuildingId::new("HQ-01"), 0.8);
        orchestrator.start(common::initial_state(), Some(thread_id.clone())).unwrap();
        assert!(orchestrator.status(&thread_id).unwrap().is_interrupted);
    }

    // Process B: fresh orchestrator over the same database and keys.
    let (orchestrator, _simulator) = durable_orchestrator(&db_path, &keys_path, 42);
    assert!(orchestrator.status(&thread_id).unwrap().is_interrupted);

    orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: true,
                roi_adjustment: 1.0,
            },
        )
        .unwrap();

    let store = SqliteCheckpointStore::open(&db_path).unwrap();
    let checkpoint = store.latest(&thread_id).unwrap().unwrap();
    let state = &checkpoint.state;
    assert_eq!(state.current_phase, Phase::Complete);
    assert_eq!(state.decision_traces.len(), 4);

    let proof_count =
        state.ui_events.iter().filter(|event| event.kind == EventKind::ProofGraph).count();
    assert_eq!(proof_count, 1);

    // Keys persisted, so every trace signed in process A verifies in process B.
    let traces = orchestrator.traces(&thread_id).unwrap();
    assert!(traces.iter().all(|trace| trace.verified));
}

/// Tests the dispatch sequence is preserved across the restart.
#[test]
fn test_dispatch_sequence_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("verdant.db");
    let keys_path = dir.path().join("keys");
    let thread_id = ThreadId::new("sequence");

    {
        let (orchestrator, simulator) = durable_orchestrator(&db_path, &keys_path, 42);
        simulator.inject(&BuildingId::new("HQ-01"), 0.8);
        orchestrator.start(common::initial_state(), Some(thread_id.clone())).unwrap();
    }

    let (orchestrator, _simulator) = durable_orchestrator(&db_path, &keys_path, 42);
    orchestrator
        .resume(
            &thread_id,
            HumanResponse {
                approved: true,
                roi_adjustment: 1.0,
            },
        )
        .unwrap();

    let store = SqliteCheckpointStore::open(&db_path).unwrap();
    let history = store.history(&thread_id).unwrap();
    let indices: Vec<u32> = history.iter().map(|record| record.step_index).collect();
    // Initial, vanguard, jurist, architect, interrupt, governor, finalize.
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);

    let agents: Vec<String> = history
        .last()
        .unwrap()
        .state
        .decision_traces
        .iter()
        .map(|trace| trace.agent_id.clone())
        .collect();
    assert_eq!(agents, vec!["vanguard", "jurist", "architect", "governor"]);
}
