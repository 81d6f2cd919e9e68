// crates/verdant-core/src/core/anomaly.rs
// ============================================================================
// Module: Verdant Anomaly Records
// Description: Telemetry anomaly classifications produced by the vanguard.
// Purpose: Carry anomaly shape and severity through the pipeline.
// Dependencies: serde, crate::core::{identifiers, time}
// ============================================================================

//! ## Overview
//! Anomaly records are shape-checked rather than enumerated: the `kind` field
//! is an open string (`energy_spike`, `water_spike`, and future kinds) while
//! severity forms a closed three-level scale shared with UI events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BuildingId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Three-level severity scale shared by anomalies and UI events.
///
/// # Invariants
/// - Variants are stable for serialization and checkpoint compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; no action required.
    Low,
    /// Degraded; action recommended.
    Medium,
    /// Critical; action required.
    High,
}

impl Severity {
    /// Returns the stable snake_case string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Anomaly Record
// ============================================================================

/// One detected telemetry anomaly.
///
/// # Invariants
/// - `kind` is an open classification string such as `energy_spike`.
/// - `peak` and `avg` carry the resource unit of the source report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Open anomaly classification string.
    pub kind: String,
    /// Building where the anomaly was observed.
    pub building_id: BuildingId,
    /// Severity classification.
    pub severity: Severity,
    /// Human-readable metric summary, for example `+32.5% above average`.
    pub metric: String,
    /// Peak hourly reading over the sampled window.
    pub peak: f64,
    /// Mean hourly reading over the sampled window.
    pub avg: f64,
    /// Number of readings flagged anomalous by the source.
    pub anomaly_count: u32,
    /// Detection timestamp.
    pub detected_at: Timestamp,
}

/// Anomaly kind emitted for energy consumption spikes.
pub const ENERGY_SPIKE: &str = "energy_spike";

/// Anomaly kind emitted for water consumption spikes.
pub const WATER_SPIKE: &str = "water_spike";
