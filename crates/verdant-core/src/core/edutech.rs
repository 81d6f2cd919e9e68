// crates/verdant-core/src/core/edutech.rs
// ============================================================================
// Module: Verdant Operator Friction Records
// Description: Cognitive friction signals and upskill recommendations.
// Purpose: Carry operator learning signals through the finalizer contribution.
// Dependencies: serde, crate::core::{anomaly, time}
// ============================================================================

//! ## Overview
//! Friction signals mark moments of operator confusion (slow approvals,
//! repeated rejections, agent self-correction loops, elevated error rates).
//! Detected signals map to targeted micro-lesson recommendations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::anomaly::Severity;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Friction Signals
// ============================================================================

/// Friction signal classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionKind {
    /// Approval latency above threshold.
    SlowApproval,
    /// Repeated consecutive operator rejections.
    RepeatedRejection,
    /// Agent self-correction loop limit reached.
    SelfCorrectionLoop,
    /// Error rate above threshold.
    HighErrorRate,
}

/// Detected cognitive friction in operator interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionSignal {
    /// Signal classification.
    pub signal_type: FrictionKind,
    /// Signal severity.
    pub severity: Severity,
    /// Description of what triggered the signal.
    pub context: String,
    /// Pipeline phase the signal occurred in.
    pub agent_phase: String,
    /// Measured duration, when applicable.
    pub duration_seconds: f64,
    /// Detection timestamp.
    pub timestamp: Timestamp,
}

/// Interaction metrics examined by the friction detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionMetrics<'a> {
    /// Approval latency in seconds.
    pub approval_latency_s: f64,
    /// Consecutive operator rejections.
    pub rejection_count: u32,
    /// Agent self-correction count.
    pub self_correction_count: u32,
    /// Errors recorded this session.
    pub error_count: u32,
    /// Total actions this session.
    pub total_actions: u32,
    /// Phase the metrics were sampled in.
    pub agent_phase: &'a str,
}

// ============================================================================
// SECTION: Upskill Recommendations
// ============================================================================

/// Urgency levels for upskill recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpskillUrgency {
    /// Optional enrichment.
    Suggested,
    /// Recommended before the next session.
    Recommended,
    /// Required before further approvals.
    Required,
}

/// Just-in-time training recommendation for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillHint {
    /// Lesson topic.
    pub topic: String,
    /// Recommendation urgency.
    pub urgency: UpskillUrgency,
    /// Micro-lesson content.
    pub content: String,
    /// Related regulatory or standards articles.
    pub related_articles: Vec<String>,
    /// Estimated completion minutes.
    pub estimated_minutes: u32,
    /// Recommendation timestamp.
    pub timestamp: Timestamp,
}
