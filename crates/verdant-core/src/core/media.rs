// crates/verdant-core/src/core/media.rs
// ============================================================================
// Module: Verdant Dashboard Intent Records
// Description: Interaction telemetry, inferred intent, and dashboard layouts.
// Purpose: Carry personalization data between the façade and the intent engine.
// Dependencies: serde, crate::core::time
// ============================================================================

//! ## Overview
//! The intent engine infers what an operator is focused on from interaction
//! telemetry and derives a personalized dashboard configuration. These are
//! façade-facing records; the pipeline stores at most the inferred intent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Interaction Telemetry
// ============================================================================

/// Telemetry payload from frontend interaction tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionTelemetry {
    /// Panel name to click count.
    pub panel_clicks: BTreeMap<String, u32>,
    /// Panel name to dwell seconds.
    pub dwell_times: BTreeMap<String, f64>,
    /// Latency of the last approval in seconds.
    pub approval_latency_s: f64,
    /// Session duration in seconds.
    pub session_duration_s: f64,
    /// Anomaly detail views this session.
    pub anomalies_viewed: u32,
    /// Whether the proof graph was expanded.
    pub proof_graph_expanded: bool,
}

// ============================================================================
// SECTION: Inferred Intent
// ============================================================================

/// Inferred operator intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIntent {
    /// Primary focus: `overview`, `compliance`, `energy`, `financial`, or `technical`.
    pub primary_focus: String,
    /// Detail level: `minimal`, `standard`, `detailed`, or `expert`.
    pub detail_level: String,
    /// Urgency: `low`, `normal`, or `high`.
    pub urgency: String,
    /// Panels ranked by interaction frequency.
    pub preferred_panels: Vec<String>,
    /// Inference timestamp.
    pub timestamp: Timestamp,
}

// ============================================================================
// SECTION: Dashboard Configuration
// ============================================================================

/// Personalized dashboard configuration derived from intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Panel rendering order.
    pub panel_order: Vec<String>,
    /// Layout emphasis.
    pub emphasis: String,
    /// Detail level carried from the intent.
    pub detail_level: String,
    /// Whether to auto-expand the proof graph.
    pub auto_expand_proof_graph: bool,
    /// Whether to highlight anomaly panels.
    pub highlight_anomalies: bool,
    /// Whether to surface settlement panels.
    pub show_settlements: bool,
    /// Adaptive accent color hex string.
    pub theme_accent: String,
}
