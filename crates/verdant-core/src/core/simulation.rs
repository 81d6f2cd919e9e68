// crates/verdant-core/src/core/simulation.rs
// ============================================================================
// Module: Verdant Simulation Records
// Description: ROI projections and digital-twin scene payloads.
// Purpose: Carry the architect's what-if outputs through state and events.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The architect produces two artifacts: an ROI projection for resolving the
//! detected anomalies and a deterministic 3D scene payload for the digital
//! twin. Both are replace-merged into state and re-derived on rejection loops.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: ROI Projection
// ============================================================================

/// Per-anomaly ROI contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiDetail {
    /// Anomaly kind the contribution belongs to.
    pub anomaly_kind: String,
    /// Monthly savings in USD.
    pub monthly_saving_usd: f64,
    /// Monthly CO₂ tons avoided.
    pub co2_tons_saved: f64,
}

/// Aggregated ROI projection for a remediation round.
///
/// # Invariants
/// - `roi_adjustment` is carried between rounds; a governor rejection scales
///   the next round's adjustment down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Projected monthly savings in USD.
    pub monthly_savings_usd: f64,
    /// Projected annual savings in USD.
    pub annual_savings_usd: f64,
    /// Three-year net present value in USD.
    pub npv_3yr_usd: f64,
    /// Months until the remediation cost is recovered.
    pub payback_months: f64,
    /// Adjustment multiplier applied to this projection.
    pub roi_adjustment: f64,
    /// Monthly CO₂ tons avoided.
    pub co2_tons_saved_monthly: f64,
    /// Annual CO₂ tons avoided.
    pub co2_tons_saved_annual: f64,
    /// Monthly cooling water saved in gallons.
    pub water_gallons_saved_monthly: f64,
    /// Environmental reduction percentage against baseline.
    pub env_reduction_pct: f64,
    /// Number of campus buildings the projection spans.
    pub campus_buildings: u32,
    /// Per-anomaly contributions.
    pub details: Vec<RoiDetail>,
}

// ============================================================================
// SECTION: Scene Payload
// ============================================================================

/// Position of a scene node in twin-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePosition {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

/// One equipment node in the digital-twin scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node identifier, row-major `rack-<row>-<col>`.
    pub id: String,
    /// Node position.
    pub position: ScenePosition,
    /// Normalized energy level in `[0, 1]`.
    pub energy_level: f64,
    /// Node status, `normal` or `anomaly`.
    pub status: String,
    /// Display color hex string.
    pub color: String,
}

/// Adjacency edge between two scene nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEdge {
    /// Source node identifier.
    pub from: String,
    /// Target node identifier.
    pub to: String,
}

/// Complete scene payload for the digital twin.
///
/// # Invariants
/// - Nodes are emitted in row-major order; edges connect grid neighbors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    /// Scene nodes.
    pub nodes: Vec<SceneNode>,
    /// Adjacency edges.
    pub connections: Vec<SceneEdge>,
}
