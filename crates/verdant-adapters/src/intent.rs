// crates/verdant-adapters/src/intent.rs
// ============================================================================
// Module: Verdant Dashboard Intent Engine
// Description: Operator intent inference and dashboard personalization.
// Purpose: Adapt panel layout and emphasis to interaction patterns.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! The intent engine infers what an operator cares about from dwell times and
//! click counts, then derives a dashboard layout: panel order, emphasis,
//! detail level, and accent color. It is a façade-level collaborator and
//! never participates in pipeline routing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdant_core::AdapterError;
use verdant_core::DashboardConfig;
use verdant_core::IntentAnalyzer;
use verdant_core::InteractionTelemetry;
use verdant_core::Timestamp;
use verdant_core::UserIntent;

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Deterministic dashboard intent engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct DashboardIntentEngine;

impl DashboardIntentEngine {
    /// Creates an intent engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IntentAnalyzer for DashboardIntentEngine {
    fn analyse(
        &self,
        telemetry: &InteractionTelemetry,
        analysed_at: Timestamp,
    ) -> Result<UserIntent, AdapterError> {
        let primary_focus = telemetry
            .dwell_times
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or("overview", |(panel, _)| focus_for_panel(panel))
            .to_string();

        let total_clicks: u32 = telemetry.panel_clicks.values().sum();
        let detail_level = if total_clicks > 20 {
            "expert"
        } else if total_clicks > 10 {
            "detailed"
        } else if total_clicks > 3 {
            "standard"
        } else {
            "minimal"
        };

        let urgency = if telemetry.anomalies_viewed > 3 || telemetry.approval_latency_s > 120.0 {
            "high"
        } else if telemetry.anomalies_viewed > 1 {
            "normal"
        } else {
            "low"
        };

        let mut ranked: Vec<(&String, &u32)> = telemetry.panel_clicks.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let preferred_panels: Vec<String> = if ranked.is_empty() {
            vec![
                "digital_twin".to_string(),
                "neural_feed".to_string(),
                "metrics".to_string(),
            ]
        } else {
            ranked.into_iter().take(5).map(|(panel, _)| panel.clone()).collect()
        };

        Ok(UserIntent {
            primary_focus,
            detail_level: detail_level.to_string(),
            urgency: urgency.to_string(),
            preferred_panels,
            timestamp: analysed_at,
        })
    }

    fn dashboard(&self, intent: &UserIntent) -> Result<DashboardConfig, AdapterError> {
        let emphasis =
            if intent.primary_focus == "overview" { "balanced" } else { &intent.primary_focus };

        Ok(DashboardConfig {
            panel_order: panel_order(emphasis),
            emphasis: emphasis.to_string(),
            detail_level: intent.detail_level.clone(),
            auto_expand_proof_graph: emphasis == "compliance",
            highlight_anomalies: matches!(intent.urgency.as_str(), "high" | "critical"),
            show_settlements: matches!(emphasis, "financial" | "balanced"),
            theme_accent: accent_for(emphasis).to_string(),
        })
    }
}

// ============================================================================
// SECTION: Mappings
// ============================================================================

/// Maps a dwelled-on panel to a focus label.
fn focus_for_panel(panel: &str) -> &'static str {
    match panel {
        "digital_twin" => "energy",
        "neural_feed" => "technical",
        "metrics" | "transactions" => "financial",
        "proof_graph" | "governor_panel" => "compliance",
        _ => "overview",
    }
}

/// Returns the panel rendering order for an emphasis.
fn panel_order(emphasis: &str) -> Vec<String> {
    let order: &[&str] = match emphasis {
        "compliance" => &[
            "proof_graph",
            "neural_feed",
            "metrics",
            "digital_twin",
            "transactions",
            "volume_chart",
            "recent_events",
        ],
        "energy" => &[
            "digital_twin",
            "metrics",
            "neural_feed",
            "volume_chart",
            "recent_events",
            "proof_graph",
            "transactions",
        ],
        "financial" => &[
            "metrics",
            "transactions",
            "volume_chart",
            "digital_twin",
            "neural_feed",
            "recent_events",
            "proof_graph",
        ],
        "technical" => &[
            "neural_feed",
            "digital_twin",
            "proof_graph",
            "metrics",
            "volume_chart",
            "recent_events",
            "transactions",
        ],
        _ => &[
            "metrics",
            "digital_twin",
            "neural_feed",
            "volume_chart",
            "recent_events",
            "transactions",
            "proof_graph",
        ],
    };
    order.iter().map(ToString::to_string).collect()
}

/// Returns the accent color for an emphasis.
fn accent_for(emphasis: &str) -> &'static str {
    match emphasis {
        "compliance" => "#a855f7",
        "financial" => "#f59e0b",
        "technical" => "#3b82f6",
        _ => "#00ff88",
    }
}
