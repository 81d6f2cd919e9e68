// crates/verdant-adapters/src/risk.rs
// ============================================================================
// Module: Verdant Risk Scoring
// Description: Composite risk scoring from anomalies, compliance, and exposure.
// Purpose: Blend operational signals into a bounded operator-facing score.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! The risk engine blends three weighted factors into a 0-100 composite:
//! aggregate anomaly severity, compliance posture, and log-scaled financial
//! exposure. Categories escalate at 40 (elevated) and 70 (critical).

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdant_core::AdapterError;
use verdant_core::AnomalyRecord;
use verdant_core::FinancialExposure;
use verdant_core::RiskCategory;
use verdant_core::RiskFactor;
use verdant_core::RiskScore;
use verdant_core::RiskScorer;
use verdant_core::Severity;
use verdant_core::Timestamp;

// ============================================================================
// SECTION: Weights
// ============================================================================

/// Severity contribution weights.
const fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::High => 0.9,
        Severity::Medium => 0.5,
        Severity::Low => 0.2,
    }
}

/// Compliance posture penalty by status string.
fn compliance_penalty(status: &str) -> f64 {
    match status {
        "non_compliant" => 30.0,
        "compliant" => 0.0,
        _ => 15.0,
    }
}

// ============================================================================
// SECTION: Risk Engine
// ============================================================================

/// Weighted composite risk scorer.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskEngine;

impl RiskEngine {
    /// Creates a risk engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RiskScorer for RiskEngine {
    fn score(
        &self,
        anomalies: &[AnomalyRecord],
        compliance_status: &str,
        financial_exposure: f64,
        scored_at: Timestamp,
    ) -> Result<RiskScore, AdapterError> {
        let mut severity_score = 0.0;
        for anomaly in anomalies {
            severity_score += severity_weight(anomaly.severity) * 25.0;
        }
        severity_score = severity_score.min(50.0);

        let comp_score = compliance_penalty(compliance_status);
        let fin_score = ((financial_exposure / 1000.0).ln_1p() * 10.0).min(20.0);

        let factors = vec![
            RiskFactor {
                name: "anomaly_severity".to_string(),
                score: round1(severity_score),
                weight: 0.4,
            },
            RiskFactor {
                name: "compliance_posture".to_string(),
                score: round1(comp_score),
                weight: 0.35,
            },
            RiskFactor {
                name: "financial_exposure".to_string(),
                score: round1(fin_score),
                weight: 0.25,
            },
        ];

        let composite =
            round1(severity_score * 0.4 + comp_score * 0.35 + fin_score * 0.25).min(100.0);
        let category = if composite >= 70.0 {
            RiskCategory::Critical
        } else if composite >= 40.0 {
            RiskCategory::Elevated
        } else {
            RiskCategory::Nominal
        };

        Ok(RiskScore {
            score: composite,
            category,
            factors,
            recommendation: recommendation(composite, anomalies.len(), compliance_status),
            timestamp: scored_at,
        })
    }
}

/// Builds the operator recommendation line for a composite score.
fn recommendation(score: f64, anomaly_count: usize, compliance: &str) -> String {
    if score >= 70.0 {
        format!(
            "CRITICAL: Immediate action required. {anomaly_count} anomalie(s) detected with \
             {compliance} compliance status. Activate incident response protocol."
        )
    } else if score >= 40.0 {
        format!(
            "ELEVATED: Monitoring escalated. {anomaly_count} anomalie(s) under review. Schedule \
             maintenance within 48 hours."
        )
    } else {
        "NOMINAL: All metrics within acceptable thresholds. Continue standard monitoring."
            .to_string()
    }
}

// ============================================================================
// SECTION: Financial Exposure
// ============================================================================

/// Aggregates financial exposure from anomalies and an optional ROI estimate.
#[must_use]
pub fn financial_exposure(
    anomalies: &[AnomalyRecord],
    monthly_savings_estimate: Option<f64>,
) -> FinancialExposure {
    let mut monthly_cost = 0.0;
    for anomaly in anomalies {
        let excess = anomaly.peak - anomaly.avg;
        match anomaly.kind.as_str() {
            "energy_spike" => monthly_cost += excess * 730.0 * 0.12,
            "water_spike" => monthly_cost += excess * 730.0 * 0.005,
            _ => {}
        }
    }

    let potential_savings = monthly_savings_estimate.unwrap_or(monthly_cost * 0.3);
    FinancialExposure {
        total_monthly_cost: round2(monthly_cost),
        total_annual_cost: round2(monthly_cost * 12.0),
        potential_savings: round2(potential_savings),
        risk_adjusted_savings: round2(potential_savings * 0.85),
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
