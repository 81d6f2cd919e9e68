// crates/verdant-core/src/core/proof.rs
// ============================================================================
// Module: Verdant Proof-Graph Builder
// Description: Deterministic Mermaid flowchart generation from trace chains.
// Purpose: Render the signed decision history as a tamper-evident diagram.
// Dependencies: serde_json, crate::core::{identifiers, trace}
// ============================================================================

//! ## Overview
//! The proof graph renders one node per decision trace between synthetic
//! START and END nodes, with role-distinguishing shapes and each edge labeled
//! by the first eight hex chars of the source trace's payload hash. Identical
//! trace chains produce byte-identical diagrams.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::identifiers::AgentId;
use crate::core::trace::DecisionTrace;

// ============================================================================
// SECTION: Diagram Generation
// ============================================================================

/// Builds a Mermaid flowchart from the decision trace chain.
#[must_use]
pub fn build_proof_graph(traces: &[DecisionTrace]) -> String {
    let mut lines = vec!["graph TD".to_string(), "    START((\"Start\"))".to_string()];

    let mut prev_node = "START".to_string();
    for (index, trace) in traces.iter().enumerate() {
        let node_id = format!("{}_{index}", trace.agent_id);
        let (open, close) = node_shape(&trace.agent_id);
        let label = node_label(trace);
        lines.push(format!("    {node_id}{open}\"{label}\"{close}"));

        let sig_short: String = trace.payload_hash.chars().take(8).collect();
        lines.push(format!("    {prev_node} -->|\"sig:{sig_short}\"| {node_id}"));
        prev_node = node_id;
    }

    lines.push(format!("    {prev_node} --> END((\"Complete\"))"));

    lines.push(String::new());
    lines.push("    classDef vanguard fill:#1e40af,stroke:#3b82f6,color:#fff".to_string());
    lines.push("    classDef jurist fill:#6b21a8,stroke:#a855f7,color:#fff".to_string());
    lines.push("    classDef architect fill:#065f46,stroke:#10b981,color:#fff".to_string());
    lines.push("    classDef governor fill:#92400e,stroke:#f59e0b,color:#fff".to_string());

    for (index, trace) in traces.iter().enumerate() {
        if AgentId::from_str_form(&trace.agent_id).is_some_and(|agent| agent != AgentId::Finalize)
        {
            lines.push(format!("    class {}_{index} {}", trace.agent_id, trace.agent_id));
        }
    }

    lines.join("\n")
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Returns the Mermaid shape delimiters distinguishing the agent role.
fn node_shape(agent_id: &str) -> (&'static str, &'static str) {
    match AgentId::from_str_form(agent_id) {
        Some(AgentId::Governor) => ("{", "}"),
        Some(AgentId::Vanguard) => ("([", "])"),
        _ => ("[", "]"),
    }
}

/// Builds the node label with a per-action annotation.
fn node_label(trace: &DecisionTrace) -> String {
    let action = trace
        .decision
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let mut label = format!("{}\\n{action}", trace.agent_id.to_uppercase());

    if let Some(savings) = trace.decision.get("monthly_savings").and_then(Value::as_f64) {
        label.push_str(&format!("\\n${}/mo", thousands(savings)));
    } else if let Some(found) = trace.decision.get("anomalies_found").and_then(Value::as_u64) {
        label.push_str(&format!("\\n{found} anomalie(s)"));
    } else if let Some(status) = trace.decision.get("status").and_then(Value::as_str) {
        label.push_str(&format!("\\n{status}"));
    } else if let Some(approved) = trace.decision.get("approved").and_then(Value::as_bool) {
        label.push_str(if approved { "\\nApproved" } else { "\\nRejected" });
    }

    label
}

/// Formats a non-negative amount with thousands separators and no decimals.
fn thousands(value: f64) -> String {
    let rounded = value.round().abs();
    let digits = format!("{rounded:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
