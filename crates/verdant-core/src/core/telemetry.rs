// crates/verdant-core/src/core/telemetry.rs
// ============================================================================
// Module: Verdant Telemetry Shapes
// Description: Building telemetry reports shared by the core and adapters.
// Purpose: Provide the canonical wire shape for cited telemetry payloads.
// Dependencies: serde, crate::core::{identifiers, time}
// ============================================================================

//! ## Overview
//! Telemetry reports are the payloads the vanguard cites before acting, so
//! their serialized form is part of the Cite-Before-Act contract: the jurist
//! re-derives citation hashes from these exact shapes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BuildingId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Resource Kind
// ============================================================================

/// Metered resource kinds reported by building telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Electrical energy in kWh.
    Energy,
    /// Water consumption in gallons.
    Water,
}

impl ResourceKind {
    /// Returns the measurement unit label for the resource.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Energy => "kWh",
            Self::Water => "gal",
        }
    }
}

// ============================================================================
// SECTION: Telemetry Report
// ============================================================================

/// One hourly telemetry reading with its anomaly score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    /// Reading timestamp.
    pub timestamp: Timestamp,
    /// Metered value in the report unit.
    pub value: f64,
    /// Anomaly score in `[0, 1]` assigned by the source.
    pub anomaly_score: f64,
}

/// Aggregate summary over a sampled telemetry window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    /// Mean hourly value.
    pub avg: f64,
    /// Peak hourly value.
    pub peak: f64,
    /// Number of readings with anomaly score above the source threshold.
    pub anomaly_count: u32,
    /// Total consumption over the window.
    pub total: f64,
    /// Number of hours sampled.
    pub hours_sampled: u32,
}

/// Full telemetry report for one building and resource.
///
/// # Invariants
/// - `summary` is derived from `readings` by the producing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    /// Building the report covers.
    pub building_id: BuildingId,
    /// Metered resource.
    pub resource: ResourceKind,
    /// Hourly readings, oldest first.
    pub readings: Vec<TelemetryReading>,
    /// Aggregate summary.
    pub summary: TelemetrySummary,
}

/// Snapshot of both telemetry streams captured by one vanguard scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Energy telemetry report.
    pub energy: TelemetryReport,
    /// Water telemetry report.
    pub water: TelemetryReport,
}
