// crates/verdant-adapters/tests/upskill.rs
// ============================================================================
// Module: Upskill Engine Tests
// Description: Tests for friction detection and lesson recommendations.
// ============================================================================
//! ## Overview
//! Validates detection thresholds and the mapping of signals onto the
//! micro-lesson library.

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

use verdant_adapters::FrictionAdvisor;
use verdant_core::FrictionKind;
use verdant_core::FrictionMetrics;
use verdant_core::Severity;
use verdant_core::Timestamp;
use verdant_core::UpskillAdvisor;
use verdant_core::UpskillUrgency;

/// Fixed timestamp for advisor tests.
fn ts() -> Timestamp {
    Timestamp::new("2026-01-01T00:00:00Z")
}

/// Baseline metrics with no friction.
fn quiet_metrics() -> FrictionMetrics<'static> {
    FrictionMetrics {
        approval_latency_s: 5.0,
        rejection_count: 0,
        self_correction_count: 0,
        error_count: 0,
        total_actions: 4,
        agent_phase: "finalize",
    }
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Tests quiet metrics produce no signals.
#[test]
fn test_quiet_metrics_no_signals() {
    let signals = FrictionAdvisor::new().detect(&quiet_metrics(), ts()).unwrap();
    assert!(signals.is_empty());
}

/// Tests slow approvals fire with latency-scaled severity.
#[test]
fn test_slow_approval_detection() {
    let advisor = FrictionAdvisor::new();

    let medium = advisor
        .detect(
            &FrictionMetrics {
                approval_latency_s: 90.0,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert_eq!(medium[0].signal_type, FrictionKind::SlowApproval);
    assert_eq!(medium[0].severity, Severity::Medium);

    let high = advisor
        .detect(
            &FrictionMetrics {
                approval_latency_s: 200.0,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert_eq!(high[0].severity, Severity::High);
}

/// Tests the self-correction loop signal fires at the limit.
#[test]
fn test_self_correction_detection() {
    let signals = FrictionAdvisor::new()
        .detect(
            &FrictionMetrics {
                self_correction_count: 3,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].signal_type, FrictionKind::SelfCorrectionLoop);
    assert_eq!(signals[0].severity, Severity::High);
}

/// Tests the error-rate signal needs both rate and absolute count.
#[test]
fn test_error_rate_detection() {
    let advisor = FrictionAdvisor::new();

    let one_error = advisor
        .detect(
            &FrictionMetrics {
                error_count: 1,
                total_actions: 2,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert!(one_error.is_empty());

    let many = advisor
        .detect(
            &FrictionMetrics {
                error_count: 3,
                total_actions: 4,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert_eq!(many[0].signal_type, FrictionKind::HighErrorRate);
}

// ============================================================================
// SECTION: Recommendations
// ============================================================================

/// Tests every detected signal maps to a lesson with urgency by severity.
#[test]
fn test_recommendations_follow_severity() {
    let advisor = FrictionAdvisor::new();
    let signals = advisor
        .detect(
            &FrictionMetrics {
                self_correction_count: 4,
                approval_latency_s: 90.0,
                ..quiet_metrics()
            },
            ts(),
        )
        .unwrap();
    assert_eq!(signals.len(), 2);

    let hints = advisor.recommend(&signals, ts()).unwrap();
    assert_eq!(hints.len(), 2);
    assert!(hints.iter().any(|hint| hint.urgency == UpskillUrgency::Required));
    assert!(hints.iter().any(|hint| hint.urgency == UpskillUrgency::Recommended));
    assert!(hints.iter().all(|hint| hint.estimated_minutes > 0));
}
