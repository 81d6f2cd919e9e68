// crates/verdant-core/src/core/compliance.rs
// ============================================================================
// Module: Verdant Regulatory Compliance Records
// Description: Regulatory articles, per-anomaly checks, and compliance reports.
// Purpose: Carry the jurist's evaluation results through state and traces.
// Dependencies: serde, crate::core::{anomaly, time}
// ============================================================================

//! ## Overview
//! The jurist evaluates every anomaly against the regulatory registry and
//! aggregates the per-anomaly checks into a single report. Report status and
//! the human-oversight flag drive downstream routing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::anomaly::AnomalyRecord;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Regulatory Articles
// ============================================================================

/// One regulatory article held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Section label, for example `Article 14`.
    pub section: String,
    /// Article title.
    pub title: String,
    /// Article body text.
    pub text: String,
    /// Search keywords attached to the article.
    pub keywords: Vec<String>,
}

/// Short article reference used in check results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Section label.
    pub section: String,
    /// Article title.
    pub title: String,
}

/// Result of a registry query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatoryQueryResult {
    /// Number of matching articles before capping.
    pub result_count: u32,
    /// Matching articles, capped by the registry.
    pub articles: Vec<Article>,
}

// ============================================================================
// SECTION: Compliance Checks
// ============================================================================

/// Verdict of evaluating one action against the regulatory registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Whether the action is compliant.
    pub compliant: bool,
    /// Risk classification string the check was run with.
    pub risk_classification: String,
    /// Whether human oversight is mandatory before execution.
    pub requires_human_oversight: bool,
    /// Whether transparency obligations apply.
    pub requires_transparency: bool,
    /// Articles relevant to the classification.
    pub relevant_articles: Vec<ArticleRef>,
    /// Rule-based reasoning summary.
    pub reasoning: String,
    /// Description of the evaluated action.
    pub action_evaluated: String,
}

/// Per-anomaly compliance finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    /// The anomaly that was evaluated.
    pub anomaly: AnomalyRecord,
    /// The registry verdict for the anomaly.
    pub compliance: ComplianceCheck,
    /// Sections referenced while evaluating.
    pub articles_referenced: Vec<String>,
}

// ============================================================================
// SECTION: Compliance Report
// ============================================================================

/// Overall compliance status for an evaluation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Every per-anomaly check passed.
    Compliant,
    /// At least one per-anomaly check rejected.
    NonCompliant,
}

impl ComplianceStatus {
    /// Returns the stable snake_case string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated compliance report produced by the jurist.
///
/// # Invariants
/// - `status` is `Compliant` iff every finding's check is compliant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Overall status.
    pub status: ComplianceStatus,
    /// Whether any finding demands human oversight.
    pub requires_human_oversight: bool,
    /// Number of anomalies evaluated.
    pub anomalies_evaluated: u32,
    /// Per-anomaly findings.
    pub findings: Vec<ComplianceFinding>,
    /// Aggregate reasoning summary.
    pub reasoning: String,
    /// Report timestamp.
    pub timestamp: Timestamp,
}
