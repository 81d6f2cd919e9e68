// crates/verdant-adapters/tests/risk.rs
// ============================================================================
// Module: Risk Scoring Tests
// Description: Tests for the composite risk engine and financial exposure.
// ============================================================================
//! ## Overview
//! Validates the weighted composite, category thresholds, and exposure
//! aggregation.

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

use verdant_adapters::RiskEngine;
use verdant_adapters::financial_exposure;
use verdant_core::AnomalyRecord;
use verdant_core::BuildingId;
use verdant_core::RiskCategory;
use verdant_core::RiskScorer;
use verdant_core::Severity;
use verdant_core::Timestamp;

/// Builds an anomaly with the given kind and severity.
fn anomaly(kind: &str, severity: Severity) -> AnomalyRecord {
    AnomalyRecord {
        kind: kind.to_string(),
        building_id: BuildingId::new("HQ-01"),
        severity,
        metric: "+30.0% above average".to_string(),
        peak: 200.0,
        avg: 140.0,
        anomaly_count: 3,
        detected_at: Timestamp::new("2026-01-01T00:00:00Z"),
    }
}

/// Fixed timestamp for scoring tests.
fn ts() -> Timestamp {
    Timestamp::new("2026-01-01T00:00:00Z")
}

// ============================================================================
// SECTION: Composite Scoring
// ============================================================================

/// Tests a clean slate scores nominal.
#[test]
fn test_no_anomalies_is_nominal() {
    let score = RiskEngine::new().score(&[], "compliant", 0.0, ts()).unwrap();
    assert_eq!(score.category, RiskCategory::Nominal);
    assert!(score.score < 40.0);
    assert_eq!(score.factors.len(), 3);
}

/// Tests severe anomalies with a non-compliant posture escalate.
#[test]
fn test_non_compliant_high_severity_escalates() {
    let anomalies =
        vec![anomaly("energy_spike", Severity::High), anomaly("water_spike", Severity::High)];
    let score =
        RiskEngine::new().score(&anomalies, "non_compliant", 50_000.0, ts()).unwrap();

    assert!(score.score >= 30.0);
    assert_ne!(score.category, RiskCategory::Nominal);
    assert!(score.recommendation.contains("anomalie(s)"));
}

/// Tests the composite never exceeds the scale ceiling.
#[test]
fn test_score_is_bounded() {
    let anomalies: Vec<AnomalyRecord> =
        (0..10).map(|_| anomaly("energy_spike", Severity::High)).collect();
    let score = RiskEngine::new()
        .score(&anomalies, "non_compliant", 1_000_000_000.0, ts())
        .unwrap();
    assert!(score.score <= 100.0);
}

// ============================================================================
// SECTION: Financial Exposure
// ============================================================================

/// Tests exposure aggregates per anomaly kind and applies the haircut.
#[test]
fn test_financial_exposure() {
    let anomalies = vec![anomaly("energy_spike", Severity::High)];
    let exposure = financial_exposure(&anomalies, Some(10_000.0));

    assert!(exposure.total_monthly_cost > 0.0);
    assert!((exposure.total_annual_cost - exposure.total_monthly_cost * 12.0).abs() < 1.0);
    assert!((exposure.risk_adjusted_savings - 8_500.0).abs() < 1e-6);
}
