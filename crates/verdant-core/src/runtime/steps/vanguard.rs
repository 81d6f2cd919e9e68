// crates/verdant-core/src/runtime/steps/vanguard.rs
// ============================================================================
// Module: Verdant Vanguard Step
// Description: Autonomous anomaly detection over building telemetry.
// Purpose: Fetch, cite, classify, sign, and surface telemetry anomalies.
// Dependencies: serde_json, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The vanguard fetches energy and water telemetry for the configured
//! building, cites both payloads before drawing any conclusion, classifies
//! threshold anomalies, signs its findings, and emits one feed event. A
//! telemetry outage degrades to a clean no-anomaly scan rather than failing
//! the thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use crate::core::AnomalyRecord;
use crate::core::CitationBlock;
use crate::core::CitationSource;
use crate::core::DialogMessage;
use crate::core::ENERGY_SPIKE;
use crate::core::HashError;
use crate::core::Phase;
use crate::core::Severity;
use crate::core::SourceId;
use crate::core::StateDelta;
use crate::core::TelemetryReport;
use crate::core::TelemetrySnapshot;
use crate::core::Timestamp;
use crate::core::UiEvent;
use crate::core::WATER_SPIKE;
use crate::core::cite;
use crate::core::state::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Hours of telemetry sampled per scan.
const SCAN_WINDOW_HOURS: u32 = 24;

/// Peak-over-average percentage above which an energy spike is high severity.
const ENERGY_HIGH_PCT: f64 = 20.0;

/// Peak-over-average percentage above which a water spike is high severity.
const WATER_HIGH_PCT: f64 = 25.0;

// ============================================================================
// SECTION: Step Function
// ============================================================================

/// Monitor step: detect anomalies in building telemetry.
///
/// # Errors
///
/// Returns [`StepError`] when signing or canonicalization fails; telemetry
/// outages are absorbed into a degraded no-anomaly delta.
pub fn vanguard_step(
    state: &ExecutionState,
    ctx: &StepContext<'_>,
) -> Result<StepResult, StepError> {
    let building = ctx.config.building_id.clone();
    let now = ctx.now();
    let iteration = state.iteration_count + 1;

    let energy = ctx.adapters.telemetry.energy(&building, SCAN_WINDOW_HOURS);
    let water = ctx.adapters.telemetry.water(&building, SCAN_WINDOW_HOURS);
    let (energy, water) = match (energy, water) {
        (Ok(energy), Ok(water)) => (energy, water),
        (Err(err), _) | (_, Err(err)) => {
            return Ok(StepResult::Delta(degraded_delta(&building.to_string(), &err, now, iteration)));
        }
    };

    let energy_citation = cite_report(
        SourceId::new(format!("bms:energy:{building}")),
        &energy,
        &format!(
            "Energy avg={:.2} kWh, peak={:.2} kWh",
            energy.summary.avg, energy.summary.peak
        ),
        now.clone(),
    )?;
    let water_citation = cite_report(
        SourceId::new(format!("bms:water:{building}")),
        &water,
        &format!(
            "Water avg={:.2} gal, peak={:.2} gal",
            water.summary.avg, water.summary.peak
        ),
        now.clone(),
    )?;

    let mut anomalies = Vec::new();
    if let Some(anomaly) =
        classify(&energy, ENERGY_SPIKE, ENERGY_HIGH_PCT, &now)
    {
        anomalies.push(anomaly);
    }
    if let Some(anomaly) = classify(&water, WATER_SPIKE, WATER_HIGH_PCT, &now) {
        anomalies.push(anomaly);
    }

    let trace = ctx.sign(
        crate::core::AgentId::Vanguard,
        json!({
            "action": "anomaly_scan",
            "building_id": building.as_str(),
            "anomalies_found": anomalies.len(),
            "energy_summary": serde_json::to_value(&energy.summary).unwrap_or_default(),
            "water_summary": serde_json::to_value(&water.summary).unwrap_or_default(),
        }),
    )?;

    let feed_event = build_feed_event(ctx, &building.to_string(), &anomalies, now.clone());

    let message = DialogMessage::new(
        "vanguard",
        format!(
            "[VANGUARD] Scanned {building}: {} anomalie(s) detected. Energy peak={:.2} kWh, \
             water peak={:.2} gal.",
            anomalies.len(),
            energy.summary.peak,
            water.summary.peak
        ),
    );

    Ok(StepResult::Delta(StateDelta {
        messages: vec![message],
        telemetry_data: Some(TelemetrySnapshot {
            energy,
            water,
        }),
        anomalies: Some(anomalies),
        citations: Some(vec![energy_citation, water_citation]),
        decision_traces: vec![trace],
        current_phase: Some(Phase::VanguardComplete),
        iteration_count: Some(iteration),
        ui_events: vec![feed_event],
        ..StateDelta::default()
    }))
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a telemetry report into an anomaly when the source flagged one.
fn classify(
    report: &TelemetryReport,
    kind: &str,
    high_pct: f64,
    detected_at: &Timestamp,
) -> Option<AnomalyRecord> {
    let summary = &report.summary;
    if summary.anomaly_count == 0 {
        return None;
    }

    let pct_above = round1((summary.peak - summary.avg) / summary.avg.max(1.0) * 100.0);
    let severity = if pct_above > high_pct { Severity::High } else { Severity::Medium };

    Some(AnomalyRecord {
        kind: kind.to_string(),
        building_id: report.building_id.clone(),
        severity,
        metric: format!("+{pct_above}% above average"),
        peak: summary.peak,
        avg: summary.avg,
        anomaly_count: summary.anomaly_count,
        detected_at: detected_at.clone(),
    })
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Builds the feed event, enriched when the optional enricher is available.
fn build_feed_event(
    ctx: &StepContext<'_>,
    building: &str,
    anomalies: &[AnomalyRecord],
    now: Timestamp,
) -> UiEvent {
    anomalies.first().map_or_else(
        || {
            UiEvent::feed(
                "VANGUARD",
                format!("Telemetry nominal for {building}: no anomalies detected."),
                Severity::Low,
                now.clone(),
            )
        },
        |primary| {
            let fallback = format!(
                "{} detected ({}) in {building}",
                humanize_kind(&primary.kind),
                primary.metric
            );
            let prompt = format!(
                "Summarise this anomaly in one professional sentence for a dashboard feed: \
                 building {building}, {}, {}, severity={}.",
                primary.kind, primary.metric, primary.severity
            );
            let message =
                ctx.adapters.enricher.enrich(&prompt).unwrap_or_else(|_| fallback.clone());
            UiEvent::feed("VANGUARD", message, primary.severity, now.clone())
        },
    )
}

/// Builds the degraded delta used when telemetry cannot be fetched.
fn degraded_delta(
    building: &str,
    err: &crate::interfaces::AdapterError,
    now: Timestamp,
    iteration: u32,
) -> StateDelta {
    StateDelta {
        messages: vec![DialogMessage::new(
            "vanguard",
            format!("[VANGUARD] Telemetry unavailable for {building}; scan degraded."),
        )],
        anomalies: Some(Vec::new()),
        citations: Some(Vec::new()),
        current_phase: Some(Phase::VanguardComplete),
        iteration_count: Some(iteration),
        error_log: vec![format!("VANGUARD: telemetry fetch failed: {err}")],
        ui_events: vec![UiEvent::feed(
            "VANGUARD",
            format!("Telemetry unavailable for {building}; scan skipped."),
            Severity::Medium,
            now,
        )],
        ..StateDelta::default()
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Cites a telemetry report through the Cite-Before-Act middleware.
fn cite_report(
    source_id: SourceId,
    report: &TelemetryReport,
    snippet: &str,
    timestamp: Timestamp,
) -> Result<CitationBlock, StepError> {
    let value = serde_json::to_value(report)
        .map_err(|err| HashError::Canonicalization(err.to_string()))?;
    Ok(cite(source_id, &CitationSource::Json(&value), snippet, timestamp)?)
}

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Humanizes an anomaly kind for feed display.
fn humanize_kind(kind: &str) -> String {
    let spaced = kind.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
