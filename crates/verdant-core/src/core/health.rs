// crates/verdant-core/src/core/health.rs
// ============================================================================
// Module: Verdant Clinical Energy Records
// Description: FHIR-style observations and clinical energy audit results.
// Purpose: Carry the finalizer's facility audit contribution through state.
// Dependencies: serde, crate::core::time
// ============================================================================

//! ## Overview
//! The clinical energy audit scores a facility against benchmark consumption
//! profiles and emits simplified FHIR R4 Observation resources for each
//! sampled reading.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: FHIR Observation
// ============================================================================

/// Simplified FHIR R4 Observation resource for energy auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FhirObservation {
    /// FHIR resource type, always `Observation`.
    pub resource_type: String,
    /// Observation identifier.
    pub id: String,
    /// Observation status, `final` for audit output.
    pub status: String,
    /// Observation category, `survey` for environment readings.
    pub category: String,
    /// Observation code.
    pub code: String,
    /// Measured quantity.
    pub value_quantity: f64,
    /// Measurement unit.
    pub unit: String,
    /// Effective timestamp.
    pub effective_date_time: Timestamp,
    /// Subject reference, a `Location/` path.
    pub subject_reference: String,
    /// Performer reference.
    pub performer_reference: String,
}

// ============================================================================
// SECTION: Clinical Energy Audit
// ============================================================================

/// Benchmark profile for a facility type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityBenchmark {
    /// Facility type label.
    pub facility_type: String,
    /// Sector-average annual kWh per square foot.
    pub avg_kwh_per_sqft: f64,
    /// Target annual kWh per square foot.
    pub target_kwh_per_sqft: f64,
    /// Top-quartile annual kWh per square foot.
    pub top_quartile_kwh: f64,
}

/// Result of auditing facility energy efficiency.
///
/// # Invariants
/// - `energy_efficiency_score` lies in `[0, 100]`.
/// - `benchmark_percentile` lies in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalEnergyAudit {
    /// Audited facility identifier.
    pub facility_id: String,
    /// Facility type the benchmark was drawn from.
    pub facility_type: String,
    /// Efficiency score against the benchmark.
    pub energy_efficiency_score: f64,
    /// Benchmark percentile placement.
    pub benchmark_percentile: u32,
    /// Observations sampled during the audit.
    pub observations: Vec<FhirObservation>,
    /// Remediation recommendations.
    pub recommendations: Vec<String>,
    /// Audit compliance status, `compliant` or `review_required`.
    pub compliance_status: String,
    /// Audit timestamp.
    pub timestamp: Timestamp,
}
