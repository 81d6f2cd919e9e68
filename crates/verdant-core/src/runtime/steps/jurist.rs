// crates/verdant-core/src/runtime/steps/jurist.rs
// ============================================================================
// Module: Verdant Jurist Step
// Description: Regulatory compliance evaluation with citation enforcement.
// Purpose: Enforce Cite-Before-Act, classify anomalies, and sign the verdict.
// Dependencies: serde_json, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The jurist refuses to act unless the vanguard attached valid data
//! citations, routing the thread into the self-correction loop instead. With
//! citations present it queries the regulatory registry, evaluates every
//! anomaly at its severity-derived risk level, aggregates the verdict, and
//! signs the compliance decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use crate::core::AgentId;
use crate::core::Article;
use crate::core::ComplianceFinding;
use crate::core::ComplianceReport;
use crate::core::ComplianceStatus;
use crate::core::DialogMessage;
use crate::core::Phase;
use crate::core::Severity;
use crate::core::StateDelta;
use crate::core::UiEvent;
use crate::core::citations_present;
use crate::core::state::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;

// ============================================================================
// SECTION: Step Function
// ============================================================================

/// Compliance step: evaluate anomalies against the regulatory registry.
///
/// # Errors
///
/// Returns [`StepError`] when signing fails; registry failures degrade the
/// corresponding finding instead of failing the thread.
pub fn jurist_step(state: &ExecutionState, ctx: &StepContext<'_>) -> Result<StepResult, StepError> {
    let now = ctx.now();

    // Cite-Before-Act enforcement comes before any other work.
    if !citations_present(&state.citations) {
        return Ok(StepResult::Delta(StateDelta {
            current_phase: Some(Phase::CitationFailure),
            error_log: vec![
                "JURIST: Cite-Before-Act violation: no valid citations from VANGUARD.".to_string(),
            ],
            ui_events: vec![UiEvent::feed(
                "JURIST",
                "Citation verification FAILED; routing back to VANGUARD for self-correction.",
                Severity::High,
                now,
            )],
            messages: vec![DialogMessage::new(
                "jurist",
                "[JURIST] Citation verification failed. Requesting VANGUARD re-scan with proper \
                 data citations.",
            )],
            ..StateDelta::default()
        }));
    }

    if state.anomalies.is_empty() {
        let report = ComplianceReport {
            status: ComplianceStatus::Compliant,
            requires_human_oversight: false,
            anomalies_evaluated: 0,
            findings: Vec::new(),
            reasoning: "No anomalies to evaluate.".to_string(),
            timestamp: now.clone(),
        };
        return Ok(StepResult::Delta(StateDelta {
            current_phase: Some(Phase::JuristComplete),
            compliance_report: Some(report),
            ui_events: vec![UiEvent::feed(
                "JURIST",
                "No anomalies to evaluate; system compliant by default.",
                Severity::Low,
                now,
            )],
            messages: vec![DialogMessage::new(
                "jurist",
                "[JURIST] No anomalies to evaluate. System is compliant.",
            )],
            ..StateDelta::default()
        }));
    }

    let mut error_log = Vec::new();
    let transparency = registry_articles(ctx, "transparency", &mut error_log);
    let oversight = registry_articles(ctx, "human oversight", &mut error_log);

    let mut referenced: Vec<String> = transparency
        .iter()
        .take(3)
        .chain(oversight.iter().take(2))
        .map(|article| article.section.clone())
        .collect();
    referenced.dedup();

    let mut findings = Vec::new();
    for anomaly in &state.anomalies {
        let action_description = format!(
            "Autonomous detection of {} anomaly in building {}: {}",
            anomaly.kind, anomaly.building_id, anomaly.metric
        );
        match ctx
            .adapters
            .regulatory
            .check_compliance_vector(&action_description, anomaly.severity.as_str())
        {
            Ok(check) => findings.push(ComplianceFinding {
                anomaly: anomaly.clone(),
                compliance: check,
                articles_referenced: referenced.clone(),
            }),
            Err(err) => {
                error_log.push(format!("JURIST: compliance check failed: {err}"));
            }
        }
    }

    let all_compliant = findings.iter().all(|finding| finding.compliance.compliant);
    let requires_hitl =
        findings.iter().any(|finding| finding.compliance.requires_human_oversight);
    let status =
        if all_compliant { ComplianceStatus::Compliant } else { ComplianceStatus::NonCompliant };

    let report = ComplianceReport {
        status,
        requires_human_oversight: requires_hitl,
        anomalies_evaluated: u32::try_from(state.anomalies.len()).unwrap_or(u32::MAX),
        findings,
        reasoning: "Detected anomalies fall within high-risk classification under the \
                    regulatory registry. Autonomous response actions require human oversight \
                    before execution; transparency obligations are satisfied through decision \
                    trace logging."
            .to_string(),
        timestamp: now.clone(),
    };

    let trace = ctx.sign(
        AgentId::Jurist,
        json!({
            "action": "compliance_evaluation",
            "status": status.as_str(),
            "anomalies_evaluated": state.anomalies.len(),
            "requires_hitl": requires_hitl,
        }),
    )?;

    let verdict_event = UiEvent::feed(
        "JURIST",
        format!(
            "Verified {} anomalie(s) against the regulatory registry: {}. Human oversight {}.",
            state.anomalies.len(),
            if all_compliant { "COMPLIANT" } else { "NON-COMPLIANT" },
            if requires_hitl { "required" } else { "not required" }
        ),
        if all_compliant { Severity::Medium } else { Severity::High },
        now.clone(),
    );
    let articles_event = UiEvent::feed(
        "JURIST",
        format!("Articles referenced: {}", referenced.join(", ")),
        Severity::Low,
        now,
    );

    let message = DialogMessage::new(
        "jurist",
        format!(
            "[JURIST] Compliance evaluation complete: {status}. Human oversight: {}. Evaluated \
             {} anomalie(s).",
            if requires_hitl { "required" } else { "not required" },
            state.anomalies.len()
        ),
    );

    Ok(StepResult::Delta(StateDelta {
        current_phase: Some(Phase::JuristComplete),
        compliance_report: Some(report),
        decision_traces: vec![trace],
        error_log,
        ui_events: vec![verdict_event, articles_event],
        messages: vec![message],
        ..StateDelta::default()
    }))
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Queries the registry for a keyword, degrading to no articles on failure.
fn registry_articles(
    ctx: &StepContext<'_>,
    keyword: &str,
    error_log: &mut Vec<String>,
) -> Vec<Article> {
    match ctx.adapters.regulatory.query(None, Some(keyword)) {
        Ok(result) => result.articles,
        Err(err) => {
            error_log.push(format!("JURIST: registry query '{keyword}' failed: {err}"));
            Vec::new()
        }
    }
}
