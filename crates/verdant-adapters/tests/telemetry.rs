// crates/verdant-adapters/tests/telemetry.rs
// ============================================================================
// Module: Telemetry Simulator Tests
// Description: Tests for simulated telemetry and anomaly injection.
// ============================================================================
//! ## Overview
//! Validates report shape, summary consistency, injection behavior including
//! consumption and clamping, and seed determinism.

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

use verdant_adapters::TelemetrySimulator;
use verdant_core::BuildingId;
use verdant_core::TelemetryProvider;

/// Building used across simulator tests.
fn building() -> BuildingId {
    BuildingId::new("HQ-01")
}

// ============================================================================
// SECTION: Report Shape
// ============================================================================

/// Tests the energy report covers the window with a consistent summary.
#[test]
fn test_energy_report_shape() {
    let simulator = TelemetrySimulator::with_seed(11);
    let report = simulator.energy(&building(), 24).unwrap();

    assert_eq!(report.readings.len(), 24);
    assert_eq!(report.summary.hours_sampled, 24);
    let peak = report.readings.iter().map(|r| r.value).fold(0.0, f64::max);
    assert!((report.summary.peak - peak).abs() < 1e-6);
    assert!(report.summary.avg > 0.0);
    assert!(report.readings.iter().all(|r| (0.0..=1.0).contains(&r.anomaly_score)));
}

/// Tests the water report uses the business-hours profile.
#[test]
fn test_water_report_shape() {
    let simulator = TelemetrySimulator::with_seed(11);
    let report = simulator.water(&building(), 24).unwrap();

    assert_eq!(report.readings.len(), 24);
    assert!(report.summary.peak >= report.summary.avg);
}

/// Tests identical seeds produce identical reports.
#[test]
fn test_seed_determinism() {
    let a = TelemetrySimulator::with_seed(42).energy(&building(), 24).unwrap();
    let b = TelemetrySimulator::with_seed(42).energy(&building(), 24).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// SECTION: Injection
// ============================================================================

/// Tests an injected spike raises the anomaly count and the average load.
#[test]
fn test_injection_raises_anomaly_count() {
    let simulator = TelemetrySimulator::with_seed(42);
    let nominal = simulator.energy(&building(), 24).unwrap();

    simulator.inject(&building(), 0.8);
    let spiked = simulator.energy(&building(), 24).unwrap();

    assert!(spiked.summary.anomaly_count >= 3);
    assert!(spiked.summary.avg > nominal.summary.avg);
    assert!(spiked.summary.total > nominal.summary.total);
}

/// Tests an injection also lands on the water stream.
#[test]
fn test_injection_covers_water() {
    let simulator = TelemetrySimulator::with_seed(42);
    simulator.inject(&building(), 0.8);
    let report = simulator.water(&building(), 24).unwrap();
    assert!(report.summary.anomaly_count >= 3);
}

/// Tests an injection is consumed by the next scan.
#[test]
fn test_injection_is_consumed() {
    let simulator = TelemetrySimulator::with_seed(42);
    simulator.inject(&building(), 0.8);

    let first = simulator.energy(&building(), 24).unwrap();
    let second = simulator.energy(&building(), 24).unwrap();

    assert!(first.summary.total > second.summary.total);
    assert!(second.summary.anomaly_count < first.summary.anomaly_count);
}

/// Tests severity is clamped into the unit interval.
#[test]
fn test_severity_clamping() {
    let simulator = TelemetrySimulator::with_seed(42);
    simulator.inject(&building(), 7.5);
    let clamped = simulator.energy(&building(), 24).unwrap();

    let reference = TelemetrySimulator::with_seed(42);
    reference.inject(&building(), 1.0);
    let full = reference.energy(&building(), 24).unwrap();

    assert_eq!(clamped, full);
}
