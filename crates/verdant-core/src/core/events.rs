// crates/verdant-core/src/core/events.rs
// ============================================================================
// Module: Verdant UI Events
// Description: Observable event records merged into execution state.
// Purpose: Provide the closed event vocabulary consumed by streaming observers.
// Dependencies: serde, crate::core::{anomaly, time}
// ============================================================================

//! ## Overview
//! UI events form the observable history of a thread. The event kind set is
//! closed so that streaming façades can translate each kind into a
//! server-sent event type without interpretation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::anomaly::Severity;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Event Kind
// ============================================================================

/// Closed set of event kinds surfaced to observers.
///
/// # Invariants
/// - Variants are stable for serialization and façade event-type mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Phase transition notification.
    PhaseChange,
    /// Narrative feed line from an agent.
    NeuralFeed,
    /// Digital-twin scene refresh.
    #[serde(rename = "3d_update")]
    ThreeDUpdate,
    /// Governor approval panel payload.
    GovernorPanel,
    /// Human-in-the-loop interrupt notification.
    Interrupt,
    /// Settlement ledger update.
    SettlementUpdate,
    /// Risk score alert.
    RiskAlert,
    /// Operator upskill recommendation.
    EdutechHint,
    /// Clinical energy audit result.
    FhirAudit,
    /// Signed proof-graph diagram.
    ProofGraph,
    /// Execution summary emitted by the finalizer.
    ExecutionComplete,
    /// Terminal stream marker.
    Complete,
}

impl EventKind {
    /// Returns the stable wire name of the event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhaseChange => "phase_change",
            Self::NeuralFeed => "neural_feed",
            Self::ThreeDUpdate => "3d_update",
            Self::GovernorPanel => "governor_panel",
            Self::Interrupt => "interrupt",
            Self::SettlementUpdate => "settlement_update",
            Self::RiskAlert => "risk_alert",
            Self::EdutechHint => "edutech_hint",
            Self::FhirAudit => "fhir_audit",
            Self::ProofGraph => "proof_graph",
            Self::ExecutionComplete => "execution_complete",
            Self::Complete => "complete",
        }
    }
}

// ============================================================================
// SECTION: UI Event
// ============================================================================

/// One observable event appended to a thread's history.
///
/// # Invariants
/// - Events are append-only; observers see them in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Display name of the emitting agent, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Display severity.
    pub severity: Severity,
    /// Optional structured payload (scene data, summaries, audits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Event timestamp.
    pub timestamp: Timestamp,
}

impl UiEvent {
    /// Builds a plain feed event without a structured payload.
    #[must_use]
    pub fn feed(
        agent: &str,
        message: impl Into<String>,
        severity: Severity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind: EventKind::NeuralFeed,
            agent: Some(agent.to_string()),
            message: message.into(),
            severity,
            payload: None,
            timestamp,
        }
    }

    /// Builds an event of the given kind carrying a structured payload.
    #[must_use]
    pub fn with_payload(
        kind: EventKind,
        agent: Option<&str>,
        message: impl Into<String>,
        severity: Severity,
        payload: Value,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind,
            agent: agent.map(ToString::to_string),
            message: message.into(),
            severity,
            payload: Some(payload),
            timestamp,
        }
    }
}

// ============================================================================
// SECTION: Dialog Messages
// ============================================================================

/// One narrative dialog entry appended by an agent step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogMessage {
    /// Stable name of the emitting agent.
    pub agent: String,
    /// Message content.
    pub content: String,
}

impl DialogMessage {
    /// Creates a dialog entry for an agent.
    #[must_use]
    pub fn new(agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            content: content.into(),
        }
    }
}
