// crates/verdant-adapters/src/upskill.rs
// ============================================================================
// Module: Verdant Upskill Engine
// Description: Cognitive friction detection and micro-lesson recommendations.
// Purpose: Turn operator interaction metrics into targeted training hints.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! The friction detector analyses approval latency, rejection streaks,
//! self-correction frequency, and error rates for moments of operator
//! confusion. Detected signals map onto a deterministic micro-lesson library.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdant_core::AdapterError;
use verdant_core::FrictionKind;
use verdant_core::FrictionMetrics;
use verdant_core::FrictionSignal;
use verdant_core::Severity;
use verdant_core::Timestamp;
use verdant_core::UpskillAdvisor;
use verdant_core::UpskillHint;
use verdant_core::UpskillUrgency;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Approval latency in seconds above which a signal fires.
const SLOW_APPROVAL_THRESHOLD_S: f64 = 60.0;

/// Self-correction count at which the loop signal fires.
const MAX_SELF_CORRECTIONS: u32 = 3;

/// Error rate at which the error signal fires.
const HIGH_ERROR_RATE: f64 = 0.3;

// ============================================================================
// SECTION: Advisor
// ============================================================================

/// Deterministic friction detector and lesson recommender.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrictionAdvisor;

impl FrictionAdvisor {
    /// Creates an advisor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl UpskillAdvisor for FrictionAdvisor {
    fn detect(
        &self,
        metrics: &FrictionMetrics<'_>,
        detected_at: Timestamp,
    ) -> Result<Vec<FrictionSignal>, AdapterError> {
        let mut signals = Vec::new();

        if metrics.approval_latency_s > SLOW_APPROVAL_THRESHOLD_S {
            signals.push(FrictionSignal {
                signal_type: FrictionKind::SlowApproval,
                severity: if metrics.approval_latency_s < 120.0 {
                    Severity::Medium
                } else {
                    Severity::High
                },
                context: format!(
                    "Approval took {:.0}s (threshold: {SLOW_APPROVAL_THRESHOLD_S:.0}s)",
                    metrics.approval_latency_s
                ),
                agent_phase: metrics.agent_phase.to_string(),
                duration_seconds: metrics.approval_latency_s,
                timestamp: detected_at.clone(),
            });
        }

        if metrics.rejection_count >= 2 {
            signals.push(FrictionSignal {
                signal_type: FrictionKind::RepeatedRejection,
                severity: if metrics.rejection_count >= 3 {
                    Severity::High
                } else {
                    Severity::Medium
                },
                context: format!(
                    "Operator rejected {} consecutive actions",
                    metrics.rejection_count
                ),
                agent_phase: metrics.agent_phase.to_string(),
                duration_seconds: 0.0,
                timestamp: detected_at.clone(),
            });
        }

        if metrics.self_correction_count >= MAX_SELF_CORRECTIONS {
            signals.push(FrictionSignal {
                signal_type: FrictionKind::SelfCorrectionLoop,
                severity: Severity::High,
                context: format!(
                    "Agent self-corrected {} times (limit: {MAX_SELF_CORRECTIONS})",
                    metrics.self_correction_count
                ),
                agent_phase: metrics.agent_phase.to_string(),
                duration_seconds: 0.0,
                timestamp: detected_at.clone(),
            });
        }

        let error_rate =
            f64::from(metrics.error_count) / f64::from(metrics.total_actions.max(1));
        if error_rate >= HIGH_ERROR_RATE && metrics.error_count >= 2 {
            signals.push(FrictionSignal {
                signal_type: FrictionKind::HighErrorRate,
                severity: if error_rate >= 0.5 { Severity::High } else { Severity::Medium },
                context: format!(
                    "Error rate {:.0}% ({}/{} actions)",
                    error_rate * 100.0,
                    metrics.error_count,
                    metrics.total_actions
                ),
                agent_phase: metrics.agent_phase.to_string(),
                duration_seconds: 0.0,
                timestamp: detected_at,
            });
        }

        Ok(signals)
    }

    fn recommend(
        &self,
        signals: &[FrictionSignal],
        recommended_at: Timestamp,
    ) -> Result<Vec<UpskillHint>, AdapterError> {
        Ok(signals
            .iter()
            .map(|signal| {
                let lesson = lesson_for(signal.signal_type);
                UpskillHint {
                    topic: lesson.topic.to_string(),
                    urgency: match signal.severity {
                        Severity::High => UpskillUrgency::Required,
                        Severity::Medium => UpskillUrgency::Recommended,
                        Severity::Low => UpskillUrgency::Suggested,
                    },
                    content: lesson.content.to_string(),
                    related_articles: lesson
                        .articles
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                    estimated_minutes: lesson.minutes,
                    timestamp: recommended_at.clone(),
                }
            })
            .collect())
    }
}

// ============================================================================
// SECTION: Lesson Library
// ============================================================================

/// One entry in the deterministic micro-lesson library.
struct Lesson {
    /// Lesson topic.
    topic: &'static str,
    /// Lesson content.
    content: &'static str,
    /// Related regulatory and standards articles.
    articles: &'static [&'static str],
    /// Estimated completion minutes.
    minutes: u32,
}

/// Returns the lesson for a friction signal kind.
const fn lesson_for(kind: FrictionKind) -> Lesson {
    match kind {
        FrictionKind::SlowApproval => Lesson {
            topic: "Understanding ROI Metrics in Energy Optimization",
            content: "When reviewing energy optimization proposals, focus on three key \
                      metrics: monthly savings (direct cost reduction), 3-year NPV (time value \
                      of money at the configured discount rate), and payback period (months \
                      until the investment is recovered). A payback under 12 months with \
                      positive NPV is almost always worth approving.",
            articles: &["Article 14 - Human Oversight", "ASHRAE 90.1 - Energy Standards"],
            minutes: 3,
        },
        FrictionKind::RepeatedRejection => Lesson {
            topic: "Compliance Thresholds and Action Boundaries",
            content: "Repeated rejections suggest a calibration gap: check whether anomaly \
                      severity thresholds are too sensitive, whether the referenced articles \
                      fit the action class, and whether the latest risk score changed the \
                      profile. Use the ROI adjustment slider to fine-tune recommendations \
                      before rejecting outright.",
            articles: &["Article 9 - Risk Management", "ISO 50001 - Energy Management"],
            minutes: 4,
        },
        FrictionKind::SelfCorrectionLoop => Lesson {
            topic: "Data Citation and Source Verification",
            content: "Self-correction loops occur when the compliance agent cannot verify data \
                      citations. Check telemetry sensor connectivity, citation formatting, and \
                      anomaly threshold configuration. The Cite-Before-Act protocol requires \
                      every decision to reference verifiable data sources.",
            articles: &["Article 13 - Transparency", "Article 71 - Auditing"],
            minutes: 5,
        },
        FrictionKind::HighErrorRate => Lesson {
            topic: "System Health and Error Diagnosis",
            content: "High error rates suggest systemic issues: check telemetry connectivity \
                      and data freshness, review recent infrastructure changes affecting \
                      baseline readings, and consider a manual diagnostic scan before \
                      triggering automated analysis.",
            articles: &["ISO 27001 - Information Security", "NIST AI 600-1 - AI Risk"],
            minutes: 3,
        },
    }
}
