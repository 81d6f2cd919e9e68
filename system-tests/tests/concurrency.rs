// system-tests/tests/concurrency.rs
// ============================================================================
// Module: Concurrency System Tests
// Description: Concurrent thread execution with per-thread serial order.
// ============================================================================
//! ## Overview
//! Runs multiple threads against one orchestrator concurrently and checks
//! that each thread's history stays monotonic and isolated.

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

use verdant_core::CheckpointStore;
use verdant_core::EventKind;
use verdant_core::Phase;
use verdant_core::ThreadId;

// ============================================================================
// SECTION: Concurrent Threads
// ============================================================================

/// Tests concurrent starts keep per-thread histories isolated and ordered.
#[test]
fn test_concurrent_threads_are_isolated() {
    let harness = common::flat_harness();
    let orchestrator = harness.orchestrator.clone();

    std::thread::scope(|scope| {
        let first = orchestrator.clone();
        let second = orchestrator.clone();
        let t1 = scope.spawn(move || {
            first.start(common::initial_state(), Some(ThreadId::new("t1"))).unwrap()
        });
        let t2 = scope.spawn(move || {
            second.start(common::initial_state(), Some(ThreadId::new("t2"))).unwrap()
        });
        t1.join().unwrap();
        t2.join().unwrap();
    });

    for name in ["t1", "t2"] {
        let thread_id = ThreadId::new(name);
        let checkpoint = harness.store.latest(&thread_id).unwrap().unwrap();
        assert_eq!(checkpoint.state.current_phase, Phase::VanguardComplete);

        // One trace per thread, signed by the shared identity.
        let traces = harness.orchestrator.traces(&thread_id).unwrap();
        assert_eq!(traces.len(), 1);
        assert!(traces[0].verified);

        // Checkpoint indices are strictly monotonic within the thread.
        let history = harness.store.history(&thread_id).unwrap();
        let indices: Vec<u32> = history.iter().map(|record| record.step_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}

/// Tests each thread's event journal is self-contained and ordered.
#[test]
fn test_event_journals_are_per_thread() {
    let harness = common::flat_harness();

    harness.orchestrator.start(common::initial_state(), Some(ThreadId::new("j1"))).unwrap();
    harness.orchestrator.start(common::initial_state(), Some(ThreadId::new("j2"))).unwrap();

    for name in ["j1", "j2"] {
        let mut rx = harness.orchestrator.subscribe(&ThreadId::new(name)).unwrap();
        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.event);
        }
        // Feed line, phase change, terminal completion, in order.
        assert_eq!(
            kinds,
            vec![EventKind::NeuralFeed, EventKind::PhaseChange, EventKind::Complete]
        );
    }
}

/// Tests late subscribers replay the committed history.
#[test]
fn test_late_subscriber_replays_history() {
    let harness = common::flat_harness();
    let thread_id = harness
        .orchestrator
        .start(common::initial_state(), Some(ThreadId::new("late")))
        .unwrap();

    let mut early = harness.orchestrator.subscribe(&thread_id).unwrap();
    let mut late = harness.orchestrator.subscribe(&thread_id).unwrap();

    let mut early_kinds = Vec::new();
    while let Ok(event) = early.try_recv() {
        early_kinds.push(event.event);
    }
    let mut late_kinds = Vec::new();
    while let Ok(event) = late.try_recv() {
        late_kinds.push(event.event);
    }

    assert_eq!(early_kinds, late_kinds);
}
