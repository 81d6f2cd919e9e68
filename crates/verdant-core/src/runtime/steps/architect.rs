// crates/verdant-core/src/runtime/steps/architect.rs
// ============================================================================
// Module: Verdant Architect Step
// Description: What-if ROI simulation, scene generation, and ticket drafting.
// Purpose: Project remediation value and prepare the approval package.
// Dependencies: rand, serde_json, sha2, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The architect computes remediation ROI for the compliance-cleared
//! anomalies, generates the digital-twin scene payload, drafts one
//! maintenance ticket, and signs the simulation. A governor rejection on a
//! prior round tightens the ROI adjustment by ten percent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use sha2::Digest;
use sha2::Sha256;

use crate::core::AgentId;
use crate::core::AnomalyRecord;
use crate::core::DialogMessage;
use crate::core::ENERGY_SPIKE;
use crate::core::EventKind;
use crate::core::Phase;
use crate::core::RoiDetail;
use crate::core::SceneData;
use crate::core::SceneEdge;
use crate::core::SceneNode;
use crate::core::ScenePosition;
use crate::core::Severity;
use crate::core::SimulationResult;
use crate::core::StateDelta;
use crate::core::ThreadId;
use crate::core::TicketDraft;
use crate::core::TicketPriority;
use crate::core::UiEvent;
use crate::core::WATER_SPIKE;
use crate::core::state::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;

// ============================================================================
// SECTION: Financial and Environmental Parameters
// ============================================================================

/// Blended commercial electricity rate in USD per kWh.
const COST_PER_KWH: f64 = 0.18;

/// Water rate in USD per gallon.
const COST_PER_GALLON: f64 = 0.008;

/// Annual discount rate used for NPV.
const DISCOUNT_RATE: f64 = 0.08;

/// Hours per month used for consumption projections.
const MONTHLY_HOURS: f64 = 730.0;

/// Campus multiplier applied to per-building savings.
const CAMPUS_BUILDINGS: u32 = 3;

/// Metric tons of CO₂ per kWh (grid national average).
const CO2_TONS_PER_KWH: f64 = 0.000_417;

/// Cooling water saved per recovered kWh in gallons.
const WATER_GALLONS_PER_KWH: f64 = 0.5;

/// Fraction of excess energy considered recoverable.
const ENERGY_RECOVERABLE: f64 = 0.35;

/// Fraction of excess water considered recoverable.
const WATER_RECOVERABLE: f64 = 0.30;

/// Fixed campus remediation cost in USD used for payback.
const REMEDIATION_COST_USD: f64 = 15_000.0;

// ============================================================================
// SECTION: Step Function
// ============================================================================

/// Simulation step: ROI analysis, scene payload, and ticket draft.
///
/// # Errors
///
/// Returns [`StepError`] when signing fails; ticket tracker failures omit the
/// draft instead of failing the thread.
pub fn architect_step(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
) -> Result<StepResult, StepError> {
    let now = ctx.now();
    let anomalies = &state.anomalies;

    // A prior rejection tightens the estimate before re-simulating.
    let roi_adjustment = match (&state.governor_approval, &state.simulation_result) {
        (Some(false), Some(previous)) => previous.roi_adjustment * 0.9,
        _ => 1.0,
    };

    let roi = compute_roi(anomalies, roi_adjustment);
    let scene = generate_scene(anomalies, ctx.thread_id, state.iteration_count);

    let mut error_log = Vec::new();
    let mut tickets = Vec::new();
    if let Some(primary) = anomalies.first() {
        let draft = TicketDraft {
            title: format!("[Auto] {} - {}", title_case(&primary.kind), primary.building_id),
            description: format!(
                "Anomaly detected: {}.\nEstimated monthly saving: ${:.2}.\n3-year NPV: \
                 ${:.2}.\n\nAuto-generated by the Verdant architect agent.",
                primary.metric, roi.monthly_savings_usd, roi.npv_3yr_usd
            ),
            priority: if primary.severity == Severity::High {
                TicketPriority::High
            } else {
                TicketPriority::Medium
            },
            building_id: primary.building_id.clone(),
        };
        match ctx.adapters.tickets.create(&draft, now.clone()) {
            Ok(ticket) => tickets.push(ticket),
            Err(err) => error_log.push(format!("ARCHITECT: ticket draft failed: {err}")),
        }
    }

    let trace = ctx.sign(
        AgentId::Architect,
        json!({
            "action": "roi_simulation",
            "monthly_savings": roi.monthly_savings_usd,
            "npv_3yr": roi.npv_3yr_usd,
            "payback_months": roi.payback_months,
            "co2_tons_saved_annual": roi.co2_tons_saved_annual,
            "env_reduction_pct": roi.env_reduction_pct,
            "campus_buildings": CAMPUS_BUILDINGS,
            "tickets_drafted": tickets.len(),
        }),
    )?;

    let mut ui_events = vec![
        UiEvent::feed(
            "ARCHITECT",
            format!(
                "ROI simulation: +${:.0}/mo across {CAMPUS_BUILDINGS} buildings (NPV 3yr: \
                 ${:.0}). CO2 reduced: {:.1} tons/yr ({}%). Payback: {} mo.",
                roi.monthly_savings_usd,
                roi.npv_3yr_usd,
                roi.co2_tons_saved_annual,
                roi.env_reduction_pct,
                roi.payback_months
            ),
            Severity::Low,
            now.clone(),
        ),
        UiEvent::with_payload(
            EventKind::ThreeDUpdate,
            None,
            "",
            Severity::Low,
            serde_json::to_value(&scene).unwrap_or_default(),
            now.clone(),
        ),
    ];
    if let Some(ticket) = tickets.first() {
        ui_events.push(UiEvent::feed(
            "ARCHITECT",
            format!("Maintenance ticket drafted: {}", ticket.ticket_id),
            Severity::Low,
            now.clone(),
        ));
    }

    let message = DialogMessage::new(
        "architect",
        format!(
            "[ARCHITECT] ROI simulation complete: ${:.2}/mo, NPV 3yr ${:.2}. {} ticket(s) \
             drafted.",
            roi.monthly_savings_usd,
            roi.npv_3yr_usd,
            tickets.len()
        ),
    );

    Ok(StepResult::Delta(StateDelta {
        current_phase: Some(Phase::ArchitectComplete),
        simulation_result: Some(roi),
        jira_tickets: Some(tickets),
        decision_traces: vec![trace],
        error_log,
        ui_events,
        messages: vec![message],
        ..StateDelta::default()
    }))
}

// ============================================================================
// SECTION: ROI Computation
// ============================================================================

/// Computes ROI savings and carbon impact from resolving detected anomalies.
#[must_use]
pub fn compute_roi(anomalies: &[AnomalyRecord], roi_adjustment: f64) -> SimulationResult {
    let campus = f64::from(CAMPUS_BUILDINGS);
    let mut total_monthly = 0.0;
    let mut total_co2_month = 0.0;
    let mut total_water_month = 0.0;
    let mut details = Vec::new();

    for anomaly in anomalies {
        let (mut monthly, co2, water) = match anomaly.kind.as_str() {
            ENERGY_SPIKE => {
                let excess_kwh = anomaly.peak - anomaly.avg;
                let recoverable = excess_kwh * MONTHLY_HOURS * ENERGY_RECOVERABLE;
                (
                    recoverable * COST_PER_KWH * campus,
                    recoverable * CO2_TONS_PER_KWH * campus,
                    recoverable * WATER_GALLONS_PER_KWH * campus,
                )
            }
            WATER_SPIKE => {
                let excess_gal = anomaly.peak - anomaly.avg;
                (
                    excess_gal * MONTHLY_HOURS * COST_PER_GALLON * WATER_RECOVERABLE * campus,
                    0.0,
                    excess_gal * MONTHLY_HOURS * WATER_RECOVERABLE * campus,
                )
            }
            _ => (800.0 * campus, 1.5, 500.0),
        };

        monthly *= roi_adjustment;
        total_monthly += monthly;
        total_co2_month += co2;
        total_water_month += water;
        details.push(RoiDetail {
            anomaly_kind: anomaly.kind.clone(),
            monthly_saving_usd: round2(monthly),
            co2_tons_saved: round3(co2),
        });
    }

    let baseline_annual_co2 =
        if total_co2_month > 0.0 { total_co2_month * 12.0 / 0.30 } else { 100.0 };
    let env_reduction_pct =
        round1(total_co2_month * 12.0 / baseline_annual_co2.max(1.0) * 100.0);

    let annual = total_monthly * 12.0;
    let npv_3yr: f64 =
        (1..=3).map(|year| annual / (1.0 + DISCOUNT_RATE).powi(year)).sum();
    let payback_months = round1(REMEDIATION_COST_USD / total_monthly.max(1.0));

    SimulationResult {
        monthly_savings_usd: round2(total_monthly),
        annual_savings_usd: round2(annual),
        npv_3yr_usd: round2(npv_3yr),
        payback_months,
        roi_adjustment,
        co2_tons_saved_monthly: round3(total_co2_month),
        co2_tons_saved_annual: round2(total_co2_month * 12.0),
        water_gallons_saved_monthly: total_water_month.round(),
        env_reduction_pct,
        campus_buildings: CAMPUS_BUILDINGS,
        details,
    }
}

// ============================================================================
// SECTION: Scene Generation
// ============================================================================

/// Rows in the digital-twin rack grid.
const SCENE_ROWS: u32 = 4;

/// Columns in the digital-twin rack grid.
const SCENE_COLS: u32 = 5;

/// Generates the deterministic 4x5 rack-grid scene payload.
///
/// Node energy jitter is seeded from `(thread_id, iteration_count)` so
/// replays and cross-process resumes reproduce identical scenes.
#[must_use]
pub fn generate_scene(
    anomalies: &[AnomalyRecord],
    thread_id: &ThreadId,
    iteration_count: u32,
) -> SceneData {
    let mut rng = StdRng::seed_from_u64(scene_seed(thread_id, iteration_count));
    let mut nodes = Vec::new();

    for row in 0..SCENE_ROWS {
        for col in 0..SCENE_COLS {
            let flagged = !anomalies.is_empty()
                && usize::try_from(row * SCENE_COLS + col).unwrap_or(usize::MAX) % 7
                    < anomalies.len();
            let (energy_level, status, color) = if flagged {
                (rng.gen_range(0.8..1.0), "anomaly", "#ff3366")
            } else {
                (rng.gen_range(0.3..0.7), "normal", "#00ff88")
            };

            nodes.push(SceneNode {
                id: format!("rack-{row}-{col}"),
                position: ScenePosition {
                    x: (f64::from(col) - 2.0) * 3.0,
                    y: 0.0,
                    z: (f64::from(row) - 1.5) * 3.0,
                },
                energy_level: round3(energy_level),
                status: status.to_string(),
                color: color.to_string(),
            });
        }
    }

    let mut connections = Vec::new();
    for row in 0..SCENE_ROWS {
        for col in 0..SCENE_COLS {
            if col + 1 < SCENE_COLS {
                connections.push(SceneEdge {
                    from: format!("rack-{row}-{col}"),
                    to: format!("rack-{row}-{}", col + 1),
                });
            }
            if row + 1 < SCENE_ROWS {
                connections.push(SceneEdge {
                    from: format!("rack-{row}-{col}"),
                    to: format!("rack-{}-{col}", row + 1),
                });
            }
        }
    }

    SceneData {
        nodes,
        connections,
    }
}

/// Derives the scene RNG seed from the thread id and iteration count.
fn scene_seed(thread_id: &ThreadId, iteration_count: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(thread_id.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(iteration_count.to_be_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to three decimal places.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Title-cases an anomaly kind for ticket titles.
fn title_case(kind: &str) -> String {
    kind.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
