// crates/verdant-core/src/runtime/steps/finalize.rs
// ============================================================================
// Module: Verdant Finalize Step
// Description: Ticket submission, best-effort contributions, and proof graph.
// Purpose: Complete the thread and surface its tamper-evident audit trail.
// Dependencies: serde_json, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The finalizer submits drafted tickets, then collects a series of strictly
//! best-effort contributions: stablecoin settlement of the agent service fee,
//! composite risk scoring, operator friction detection with upskill hints,
//! the clinical energy audit, and stablecoin-framework checks. Each failure
//! omits only that contribution. The step closes by building the
//! deterministic proof graph and emitting the completion events. It
//! aggregates rather than decides, so it signs nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::core::DialogMessage;
use crate::core::EventKind;
use crate::core::FrameworkCheck;
use crate::core::FrictionMetrics;
use crate::core::Phase;
use crate::core::SettlementRequest;
use crate::core::Severity;
use crate::core::StateDelta;
use crate::core::TicketRecord;
use crate::core::TicketStatus;
use crate::core::Timestamp;
use crate::core::UiEvent;
use crate::core::UpskillHint;
use crate::core::build_proof_graph;
use crate::core::state::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Service-fee fraction of monthly savings settled architect to governor.
const SERVICE_FEE_FRACTION: f64 = 0.001;

/// Approximate USD to EUR conversion used for the MiCA check.
const USD_TO_EUR: f64 = 0.92;

/// Facility type assumed for the clinical energy audit.
const AUDIT_FACILITY_TYPE: &str = "data_center";

/// Facility floor area in square feet assumed for the audit.
const AUDIT_SQFT: f64 = 60_000.0;

/// Fallback energy readings when neither telemetry nor anomalies are usable.
const FALLBACK_READINGS: [f64; 5] = [145.0, 138.0, 152.0, 180.0, 141.0];

// ============================================================================
// SECTION: Step Function
// ============================================================================

/// Final step: submit tickets, gather contributions, build the proof graph.
///
/// # Errors
///
/// This step absorbs every adapter failure; the `Result` shape is shared with
/// the other steps.
#[allow(
    clippy::too_many_lines,
    reason = "Maintain a single linear flow for ordered contributions and event emission."
)]
pub fn finalize_step(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
) -> Result<StepResult, StepError> {
    let now = ctx.now();
    let simulation = state.simulation_result.as_ref();
    let monthly_savings = simulation.map_or(0.0, |s| s.monthly_savings_usd);
    let compliance_status =
        state.compliance_report.as_ref().map_or("unknown", |report| report.status.as_str());

    // Submit drafted tickets by advancing their status.
    let mut tickets = Vec::new();
    let mut submitted_ids = Vec::new();
    for ticket in &state.jira_tickets {
        let submitted = submit_ticket(ctx, ticket, now.clone());
        submitted_ids.push(submitted.ticket_id.to_string());
        tickets.push(submitted);
    }

    // Settlement of the agent service fee.
    let mut settlements = Vec::new();
    let fee = round4(monthly_savings * SERVICE_FEE_FRACTION);
    if fee > 0.0 {
        let request = SettlementRequest {
            from_agent: "architect".to_string(),
            to_agent: "governor".to_string(),
            amount_usdc: fee,
            memo: format!(
                "A2A service fee for thread execution: {} anomalies resolved",
                state.anomalies.len()
            ),
        };
        if let Ok(receipt) = ctx.adapters.settlement.settle(&request, now.clone()) {
            settlements.push(receipt);
        }
    }

    // Composite risk score.
    let risk_scores = ctx
        .adapters
        .risk
        .score(&state.anomalies, compliance_status, monthly_savings, now.clone())
        .map(|score| vec![score])
        .unwrap_or_default();

    // Operator friction detection and upskill hints.
    let edutech_hints = collect_upskill_hints(state, ctx, now.clone());

    // Clinical energy audit.
    let facility_id = state
        .anomalies
        .first()
        .map_or_else(|| ctx.config.building_id.clone(), |a| a.building_id.clone());
    let audit = ctx
        .adapters
        .fhir
        .audit(&facility_id, &energy_readings(state), AUDIT_FACILITY_TYPE, AUDIT_SQFT, now.clone())
        .ok();
    let fhir_observations =
        audit.as_ref().map(|audit| audit.observations.clone()).unwrap_or_default();

    // Stablecoin-framework checks.
    let framework_checks = collect_framework_checks(state, ctx, &settlements, now.clone());

    // Deterministic proof graph over the trace chain.
    let mermaid = build_proof_graph(&state.decision_traces);

    let summary = json!({
        "anomalies_detected": state.anomalies.len(),
        "compliance_status": compliance_status,
        "monthly_savings_usd": monthly_savings,
        "npv_3yr_usd": simulation.map_or(0.0, |s| s.npv_3yr_usd),
        "co2_tons_saved_annual": simulation.map_or(0.0, |s| s.co2_tons_saved_annual),
        "env_reduction_pct": simulation.map_or(0.0, |s| s.env_reduction_pct),
        "tickets_submitted": submitted_ids,
        "decision_traces_count": state.decision_traces.len(),
        "governor_approved": state.governor_approval,
        "fhir_audit_score": audit.as_ref().map(|a| a.energy_efficiency_score),
        "framework_checks": framework_checks
            .iter()
            .map(|check| json!({"framework": check.framework, "compliant": check.compliant}))
            .collect::<Vec<_>>(),
        "completed_at": now.as_str(),
    });

    let mut ui_events = vec![
        UiEvent::with_payload(
            EventKind::ProofGraph,
            None,
            "",
            Severity::Low,
            json!({"mermaid": mermaid}),
            now.clone(),
        ),
        UiEvent::feed(
            "SYSTEM",
            format!(
                "Loop complete: {} anomalie(s) resolved, ${:.0}/mo projected saving, {} \
                 ticket(s) submitted.",
                state.anomalies.len(),
                monthly_savings,
                submitted_ids.len()
            ),
            Severity::Low,
            now.clone(),
        ),
        UiEvent::with_payload(
            EventKind::ExecutionComplete,
            None,
            "",
            Severity::Low,
            summary,
            now.clone(),
        ),
    ];

    if let Some(receipt) = settlements.first() {
        ui_events.push(UiEvent::with_payload(
            EventKind::SettlementUpdate,
            Some("SYSTEM"),
            format!("USDC settlement: ${:.4} ({})", receipt.amount_usdc, receipt.status),
            Severity::Low,
            serde_json::to_value(receipt).unwrap_or(Value::Null),
            now.clone(),
        ));
        ui_events.push(UiEvent::feed(
            "SYSTEM",
            format!(
                "A2A settlement: ${:.4} USDC on {}",
                receipt.amount_usdc, receipt.network
            ),
            Severity::Low,
            now.clone(),
        ));
    }

    if let Some(score) = risk_scores.first() {
        let severity = if score.score >= 70.0 {
            Severity::High
        } else if score.score >= 40.0 {
            Severity::Medium
        } else {
            Severity::Low
        };
        ui_events.push(UiEvent::with_payload(
            EventKind::RiskAlert,
            Some("SYSTEM"),
            format!("Risk score: {:.1}/100 ({})", score.score, score.category),
            severity,
            serde_json::to_value(score).unwrap_or(Value::Null),
            now.clone(),
        ));
        ui_events.push(UiEvent::feed(
            "SYSTEM",
            format!("Risk assessment: {:.1}/100. {}", score.score, score.recommendation),
            if score.score >= 40.0 { Severity::Medium } else { Severity::Low },
            now.clone(),
        ));
    }

    for hint in &edutech_hints {
        ui_events.push(UiEvent::with_payload(
            EventKind::EdutechHint,
            Some("SYSTEM"),
            format!("Upskill: {}", hint.topic),
            Severity::Low,
            serde_json::to_value(hint).unwrap_or(Value::Null),
            now.clone(),
        ));
    }

    if let Some(audit) = &audit {
        ui_events.push(UiEvent::with_payload(
            EventKind::FhirAudit,
            Some("FHIR"),
            format!(
                "Clinical energy audit: {} scored {:.1}/100, percentile {}%",
                audit.facility_id, audit.energy_efficiency_score, audit.benchmark_percentile
            ),
            if audit.energy_efficiency_score < 60.0 { Severity::Medium } else { Severity::Low },
            serde_json::to_value(audit).unwrap_or(Value::Null),
            now.clone(),
        ));
        ui_events.push(UiEvent::feed(
            "FHIR",
            format!(
                "Clinical energy audit: {:.0}/100 efficiency, {} recommendation(s)",
                audit.energy_efficiency_score,
                audit.recommendations.len()
            ),
            Severity::Low,
            now.clone(),
        ));
    }

    for check in &framework_checks {
        ui_events.push(UiEvent::feed(
            "FINTECH",
            format!("{}: {}", check.framework, check.details),
            if check.compliant { Severity::Low } else { Severity::High },
            now.clone(),
        ));
    }

    let message = DialogMessage::new(
        "system",
        format!(
            "[SYSTEM] Execution complete. {} anomalie(s), ${:.2}/mo saving, {} ticket(s) \
             submitted, {} settlement(s).",
            state.anomalies.len(),
            monthly_savings,
            submitted_ids.len(),
            settlements.len()
        ),
    );

    Ok(StepResult::Delta(StateDelta {
        current_phase: Some(Phase::Complete),
        jira_tickets: Some(tickets),
        settlements,
        risk_scores,
        fhir_observations,
        edutech_hints,
        ui_events,
        messages: vec![message],
        ..StateDelta::default()
    }))
}

// ============================================================================
// SECTION: Contributions
// ============================================================================

/// Submits one drafted ticket, falling back to a local status change when the
/// tracker is unavailable.
fn submit_ticket(ctx: &StepContext<'_>, ticket: &TicketRecord, now: Timestamp) -> TicketRecord {
    ctx.adapters
        .tickets
        .update_status(&ticket.ticket_id, TicketStatus::InProgress, now.clone())
        .unwrap_or_else(|_| {
            let mut local = ticket.clone();
            local.status = TicketStatus::InProgress;
            local.updated_at = Some(now);
            local
        })
}

/// Detects operator friction and maps signals to upskill hints.
fn collect_upskill_hints(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
    now: Timestamp,
) -> Vec<UpskillHint> {
    let metrics = FrictionMetrics {
        approval_latency_s: 0.0,
        rejection_count: 0,
        self_correction_count: state.iteration_count.saturating_sub(1),
        error_count: u32::try_from(state.error_log.len()).unwrap_or(u32::MAX),
        total_actions: state.iteration_count.max(1),
        agent_phase: "finalize",
    };
    let Ok(signals) = ctx.adapters.upskill.detect(&metrics, now.clone()) else {
        return Vec::new();
    };
    if signals.is_empty() {
        return Vec::new();
    }
    ctx.adapters.upskill.recommend(&signals, now).unwrap_or_default()
}

/// Runs the stablecoin-framework checks over the settled amount.
fn collect_framework_checks(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
    settlements: &[crate::core::SettlementReceipt],
    now: Timestamp,
) -> Vec<FrameworkCheck> {
    let settled: f64 = settlements.iter().map(|receipt| receipt.amount_usdc).sum();
    let mut agent_ids: Vec<String> =
        state.decision_traces.iter().map(|trace| trace.agent_id.clone()).collect();
    agent_ids.sort();
    agent_ids.dedup();

    let mut checks = Vec::new();
    if let Ok(check) =
        ctx.adapters.fintech.check_genius_act("settlement", settled, &agent_ids, now.clone())
    {
        checks.push(check);
    }
    if let Ok(check) =
        ctx.adapters.fintech.check_mica("usdc_transfer", settled * USD_TO_EUR, true, now)
    {
        checks.push(check);
    }
    checks
}

/// Extracts energy readings for the audit, preferring captured telemetry and
/// falling back to anomaly-derived, then fixed, series.
fn energy_readings(state: &ExecutionState) -> Vec<f64> {
    if let Some(snapshot) = &state.telemetry_data {
        let readings: Vec<f64> =
            snapshot.energy.readings.iter().take(10).map(|reading| reading.value).collect();
        if !readings.is_empty() {
            return readings;
        }
    }

    for anomaly in &state.anomalies {
        if anomaly.kind == crate::core::ENERGY_SPIKE {
            let mut readings = vec![anomaly.avg; 8];
            readings.extend([anomaly.peak; 2]);
            return readings;
        }
    }

    FALLBACK_READINGS.to_vec()
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Rounds to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
