// crates/verdant-core/src/runtime/steps/governor.rs
// ============================================================================
// Module: Verdant Governor Step
// Description: Mandatory human-in-the-loop breakpoint with command routing.
// Purpose: Suspend for approval, then route to finalization or re-simulation.
// Dependencies: serde_json, crate::{core, runtime}
// ============================================================================

//! ## Overview
//! The governor is the only step that suspends execution. On first entry it
//! raises an interrupt carrying the action summary and panel events; on
//! re-entry with a bound human response it signs the approval decision and
//! returns a command routing to the finalizer (approved) or back to the
//! architect with an adjusted ROI (rejected).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use crate::core::AgentId;
use crate::core::DialogMessage;
use crate::core::EventKind;
use crate::core::InterruptPayload;
use crate::core::Phase;
use crate::core::Severity;
use crate::core::StateDelta;
use crate::core::UiEvent;
use crate::core::state::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;

// ============================================================================
// SECTION: Step Function
// ============================================================================

/// Breakpoint step: pause for human approval before executing actions.
///
/// # Errors
///
/// Returns [`StepError`] when signing the approval decision fails.
pub fn governor_step(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
) -> Result<StepResult, StepError> {
    let now = ctx.now();
    let simulation = state.simulation_result.as_ref();
    let monthly_savings = simulation.map_or(0.0, |s| s.monthly_savings_usd);
    let co2_annual = simulation.map_or(0.0, |s| s.co2_tons_saved_annual);
    let env_pct = simulation.map_or(0.0, |s| s.env_reduction_pct);
    let compliance_status =
        state.compliance_report.as_ref().map_or("unknown", |report| report.status.as_str());

    let action_summary = format!(
        "Approve maintenance action for {} anomalie(s). Estimated monthly saving: ${:.2}. CO2 \
         reduction: {:.1} tons/yr ({}%). Compliance status: {}. Tickets to submit: {}.",
        state.anomalies.len(),
        monthly_savings,
        co2_annual,
        env_pct,
        compliance_status,
        state.jira_tickets.len()
    );

    let Some(response) = ctx.human_response else {
        // First entry: raise the interrupt and let the runtime park the thread.
        let panel_events = vec![
            UiEvent::with_payload(
                EventKind::GovernorPanel,
                Some("GOVERNOR"),
                action_summary.clone(),
                Severity::Medium,
                json!({
                    "action_summary": action_summary,
                    "estimated_roi": monthly_savings,
                    "npv_3yr": simulation.map_or(0.0, |s| s.npv_3yr_usd),
                    "payback_months": simulation.map_or(0.0, |s| s.payback_months),
                    "co2_tons_saved_annual": co2_annual,
                    "env_reduction_pct": env_pct,
                    "campus_buildings": simulation.map_or(1, |s| s.campus_buildings),
                    "requires_approval": true,
                }),
                now.clone(),
            ),
            UiEvent::feed(
                "GOVERNOR",
                "Awaiting human approval for state-mutating action...",
                Severity::Medium,
                now,
            ),
        ];
        return Ok(StepResult::Suspended(InterruptPayload {
            action_summary,
            estimated_roi: monthly_savings,
            ui_events: panel_events,
        }));
    };

    let trace = ctx.sign(
        AgentId::Governor,
        json!({
            "action": "human_approval",
            "approved": response.approved,
            "roi_adjustment": response.roi_adjustment,
        }),
    )?;

    if response.approved {
        Ok(StepResult::Command {
            goto: AgentId::Finalize,
            update: StateDelta {
                governor_approval: Some(true),
                current_phase: Some(Phase::GovernorApproved),
                decision_traces: vec![trace],
                ui_events: vec![UiEvent::feed(
                    "GOVERNOR",
                    "Action APPROVED by human operator.",
                    Severity::Low,
                    ctx.now(),
                )],
                messages: vec![DialogMessage::new(
                    "governor",
                    "[GOVERNOR] Human operator approved the action. Proceeding to finalization.",
                )],
                ..StateDelta::default()
            },
        })
    } else {
        // Rejection drives the adjustment loop back through the architect.
        let adjusted = simulation.map(|previous| {
            let mut next = previous.clone();
            next.roi_adjustment = response.roi_adjustment;
            next
        });
        Ok(StepResult::Command {
            goto: AgentId::Architect,
            update: StateDelta {
                governor_approval: Some(false),
                current_phase: Some(Phase::GovernorRejected),
                simulation_result: adjusted,
                decision_traces: vec![trace],
                ui_events: vec![UiEvent::feed(
                    "GOVERNOR",
                    format!(
                        "Action REJECTED. Re-simulating with ROI adjustment x{:.2}.",
                        response.roi_adjustment
                    ),
                    Severity::Medium,
                    ctx.now(),
                )],
                messages: vec![DialogMessage::new(
                    "governor",
                    format!(
                        "[GOVERNOR] Action rejected. Re-routing to ARCHITECT with ROI \
                         adjustment {}.",
                        response.roi_adjustment
                    ),
                )],
                ..StateDelta::default()
            },
        })
    }
}
