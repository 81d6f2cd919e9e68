// crates/verdant-core/src/core/state.rs
// ============================================================================
// Module: Verdant Execution State
// Description: Typed shared state, per-field merge semantics, and checkpoints.
// Purpose: Capture deterministic run evolution for replay and resumption.
// Dependencies: serde, crate::core::{anomaly, citation, compliance, edutech,
// events, fintech, health, identifiers, media, simulation, telemetry, tickets, time, trace}
// ============================================================================

//! ## Overview
//! Execution state is merged, not mutated: each step returns a [`StateDelta`]
//! and the runtime applies it through [`ExecutionState::apply`], the single
//! site encoding the field-keyed merge table. Replace fields take the delta
//! value verbatim; append fields concatenate preserving order and only ever
//! grow across a thread's history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::anomaly::AnomalyRecord;
use crate::core::citation::CitationBlock;
use crate::core::compliance::ComplianceReport;
use crate::core::edutech::UpskillHint;
use crate::core::events::DialogMessage;
use crate::core::events::UiEvent;
use crate::core::fintech::RiskScore;
use crate::core::fintech::SettlementReceipt;
use crate::core::health::FhirObservation;
use crate::core::identifiers::AgentId;
use crate::core::media::UserIntent;
use crate::core::simulation::SimulationResult;
use crate::core::telemetry::TelemetrySnapshot;
use crate::core::tickets::TicketRecord;
use crate::core::trace::DecisionTrace;

// ============================================================================
// SECTION: Phase
// ============================================================================

/// Pipeline phase advanced by each step.
///
/// # Invariants
/// - Advances monotonically through the pipeline except when the
///   self-correction or adjustment loop is taken.
/// - Variants are stable for serialization and checkpoint compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Initial phase before the first dispatch.
    Starting,
    /// Vanguard scan finished.
    VanguardComplete,
    /// Jurist rejected the scan for missing citations.
    CitationFailure,
    /// Jurist evaluation finished.
    JuristComplete,
    /// Architect simulation finished.
    ArchitectComplete,
    /// Governor approved the pending action.
    GovernorApproved,
    /// Governor rejected the pending action.
    GovernorRejected,
    /// Finalizer finished; terminal.
    Complete,
    /// Thread cancelled between steps; terminal.
    Cancelled,
    /// Dispatch cap exceeded; terminal.
    RecursionExceeded,
    /// A step raised; terminal.
    Error,
}

impl Phase {
    /// Returns the stable snake_case string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::VanguardComplete => "vanguard_complete",
            Self::CitationFailure => "citation_failure",
            Self::JuristComplete => "jurist_complete",
            Self::ArchitectComplete => "architect_complete",
            Self::GovernorApproved => "governor_approved",
            Self::GovernorRejected => "governor_rejected",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
            Self::RecursionExceeded => "recursion_exceeded",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Execution State
// ============================================================================

/// Full shared state of one pipeline thread.
///
/// # Invariants
/// - Append-merge fields (`messages`, `decision_traces`, `settlements`,
///   `risk_scores`, `fhir_observations`, `edutech_hints`, `error_log`,
///   `ui_events`) only ever grow across a thread's history.
/// - `iteration_count` increases only in the vanguard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    /// Narrative dialog entries, append-merged.
    pub messages: Vec<DialogMessage>,
    /// Last captured telemetry snapshot, replace-merged.
    pub telemetry_data: Option<TelemetrySnapshot>,
    /// Anomalies from the latest scan, replace-merged.
    pub anomalies: Vec<AnomalyRecord>,
    /// Citations from the latest scan, replace-merged.
    pub citations: Vec<CitationBlock>,
    /// Signed decision traces, append-merged.
    pub decision_traces: Vec<DecisionTrace>,
    /// Latest compliance report, replace-merged.
    pub compliance_report: Option<ComplianceReport>,
    /// Latest ROI projection, replace-merged.
    pub simulation_result: Option<SimulationResult>,
    /// Drafted maintenance tickets, replace-merged.
    pub jira_tickets: Vec<TicketRecord>,
    /// Tri-state governor verdict, replace-merged.
    pub governor_approval: Option<bool>,
    /// Settlement receipts, append-merged.
    pub settlements: Vec<SettlementReceipt>,
    /// Risk scores, append-merged.
    pub risk_scores: Vec<RiskScore>,
    /// Clinical observations, append-merged.
    pub fhir_observations: Vec<FhirObservation>,
    /// Operator upskill hints, append-merged.
    pub edutech_hints: Vec<UpskillHint>,
    /// Inferred operator intent, replace-merged.
    pub user_intent: Option<UserIntent>,
    /// Current pipeline phase, replace-merged.
    pub current_phase: Phase,
    /// Error log lines, append-merged.
    pub error_log: Vec<String>,
    /// Vanguard scan count, replace-merged.
    pub iteration_count: u32,
    /// Observable UI events, append-merged.
    pub ui_events: Vec<UiEvent>,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            telemetry_data: None,
            anomalies: Vec::new(),
            citations: Vec::new(),
            decision_traces: Vec::new(),
            compliance_report: None,
            simulation_result: None,
            jira_tickets: Vec::new(),
            governor_approval: None,
            settlements: Vec::new(),
            risk_scores: Vec::new(),
            fhir_observations: Vec::new(),
            edutech_hints: Vec::new(),
            user_intent: None,
            current_phase: Phase::Starting,
            error_log: Vec::new(),
            iteration_count: 0,
            ui_events: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: State Delta
// ============================================================================

/// Per-step state update applied by the runtime.
///
/// Replace fields are `Option`al: `None` leaves state unchanged. Append
/// fields are lists concatenated onto the existing list. The merger performs
/// no deduplication; steps never emit duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    /// Dialog entries to append.
    pub messages: Vec<DialogMessage>,
    /// Replacement telemetry snapshot.
    pub telemetry_data: Option<TelemetrySnapshot>,
    /// Replacement anomaly list.
    pub anomalies: Option<Vec<AnomalyRecord>>,
    /// Replacement citation list.
    pub citations: Option<Vec<CitationBlock>>,
    /// Decision traces to append.
    pub decision_traces: Vec<DecisionTrace>,
    /// Replacement compliance report.
    pub compliance_report: Option<ComplianceReport>,
    /// Replacement ROI projection.
    pub simulation_result: Option<SimulationResult>,
    /// Replacement ticket list.
    pub jira_tickets: Option<Vec<TicketRecord>>,
    /// Replacement governor verdict.
    pub governor_approval: Option<bool>,
    /// Settlement receipts to append.
    pub settlements: Vec<SettlementReceipt>,
    /// Risk scores to append.
    pub risk_scores: Vec<RiskScore>,
    /// Clinical observations to append.
    pub fhir_observations: Vec<FhirObservation>,
    /// Upskill hints to append.
    pub edutech_hints: Vec<UpskillHint>,
    /// Replacement operator intent.
    pub user_intent: Option<UserIntent>,
    /// Replacement pipeline phase.
    pub current_phase: Option<Phase>,
    /// Error log lines to append.
    pub error_log: Vec<String>,
    /// Replacement vanguard scan count.
    pub iteration_count: Option<u32>,
    /// UI events to append.
    pub ui_events: Vec<UiEvent>,
}

impl ExecutionState {
    /// Applies a step delta to the state.
    ///
    /// This is the single site encoding the merge table: replace fields take
    /// the delta value verbatim, append fields concatenate preserving order,
    /// and missing fields leave state unchanged.
    pub fn apply(&mut self, delta: StateDelta) {
        self.messages.extend(delta.messages);
        if let Some(telemetry) = delta.telemetry_data {
            self.telemetry_data = Some(telemetry);
        }
        if let Some(anomalies) = delta.anomalies {
            self.anomalies = anomalies;
        }
        if let Some(citations) = delta.citations {
            self.citations = citations;
        }
        self.decision_traces.extend(delta.decision_traces);
        if let Some(report) = delta.compliance_report {
            self.compliance_report = Some(report);
        }
        if let Some(simulation) = delta.simulation_result {
            self.simulation_result = Some(simulation);
        }
        if let Some(tickets) = delta.jira_tickets {
            self.jira_tickets = tickets;
        }
        if let Some(approval) = delta.governor_approval {
            self.governor_approval = Some(approval);
        }
        self.settlements.extend(delta.settlements);
        self.risk_scores.extend(delta.risk_scores);
        self.fhir_observations.extend(delta.fhir_observations);
        self.edutech_hints.extend(delta.edutech_hints);
        if let Some(intent) = delta.user_intent {
            self.user_intent = Some(intent);
        }
        if let Some(phase) = delta.current_phase {
            self.current_phase = phase;
        }
        self.error_log.extend(delta.error_log);
        if let Some(count) = delta.iteration_count {
            self.iteration_count = count;
        }
        self.ui_events.extend(delta.ui_events);
    }
}

// ============================================================================
// SECTION: Interrupts
// ============================================================================

/// Payload raised by the governor when suspending for human approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterruptPayload {
    /// Human-facing summary of the pending action.
    pub action_summary: String,
    /// Estimated monthly savings in USD.
    pub estimated_roi: f64,
    /// Panel and waiting events to surface while suspended.
    pub ui_events: Vec<UiEvent>,
}

/// Human decision injected when resuming a suspended thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanResponse {
    /// Whether the pending action is approved.
    pub approved: bool,
    /// ROI adjustment multiplier in `[0.5, 1.5]`.
    pub roi_adjustment: f64,
}

// ============================================================================
// SECTION: Run Status and Checkpoints
// ============================================================================

/// Thread lifecycle status persisted with each checkpoint.
///
/// # Invariants
/// - Variants are stable for serialization and checkpoint compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Thread has pending dispatches.
    Running,
    /// Thread is suspended at the governor breakpoint.
    Waiting,
    /// Thread reached a terminal node.
    Completed,
    /// Thread was cancelled between steps.
    Cancelled,
    /// Thread terminated on a step failure or cap breach.
    Failed,
}

/// Durable snapshot of a thread at a step boundary.
///
/// # Invariants
/// - `step_index` is monotonic within a thread; one checkpoint per step.
/// - A checkpoint is sufficient to resume the thread in another process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    /// Number of step dispatches completed so far.
    pub step_index: u32,
    /// Full state snapshot after the step's delta was merged.
    pub state: ExecutionState,
    /// Next node to dispatch; `None` when terminal.
    pub next: Option<AgentId>,
    /// Pending interrupt awaiting a human response.
    pub pending_interrupt: Option<InterruptPayload>,
    /// Thread lifecycle status.
    pub status: RunStatus,
}
