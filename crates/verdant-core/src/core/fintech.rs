// crates/verdant-core/src/core/fintech.rs
// ============================================================================
// Module: Verdant Fintech Records
// Description: Settlement, risk-scoring, and stablecoin-compliance records.
// Purpose: Carry the finalizer's financial contributions through state.
// Dependencies: serde, crate::core::time
// ============================================================================

//! ## Overview
//! These records are produced by best-effort finalizer adapters: settlement of
//! agent service fees on a mock ledger, composite risk scoring, and rule-based
//! stablecoin-framework checks. Adapter failure omits the record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Settlement Records
// ============================================================================

/// Request to settle an agent-to-agent service fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// Paying agent.
    pub from_agent: String,
    /// Receiving agent.
    pub to_agent: String,
    /// Fee amount in stablecoin units.
    pub amount_usdc: f64,
    /// Human-readable memo.
    pub memo: String,
}

/// Settlement outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Transfer confirmed on the ledger.
    Confirmed,
    /// Transfer rejected, typically for insufficient balance.
    Failed,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Receipt of a completed or rejected settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Ledger transaction signature.
    pub tx_signature: String,
    /// Paying agent.
    pub from_agent: String,
    /// Receiving agent.
    pub to_agent: String,
    /// Settled amount in stablecoin units.
    pub amount_usdc: f64,
    /// Ledger network label.
    pub network: String,
    /// Settlement outcome.
    pub status: SettlementStatus,
    /// Settlement timestamp.
    pub timestamp: Timestamp,
    /// Memo carried on the transfer.
    pub memo: String,
    /// Ledger block hash for confirmed transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
}

// ============================================================================
// SECTION: Risk Records
// ============================================================================

/// One weighted factor contributing to a composite risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor name.
    pub name: String,
    /// Factor score contribution.
    pub score: f64,
    /// Factor weight in the composite.
    pub weight: f64,
}

/// Composite risk categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Within acceptable thresholds.
    Nominal,
    /// Escalated monitoring required.
    Elevated,
    /// Immediate action required.
    Critical,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Nominal => "nominal",
            Self::Elevated => "elevated",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Composite risk score for an operational decision.
///
/// # Invariants
/// - `score` lies in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Composite score, 0 = no risk, 100 = critical.
    pub score: f64,
    /// Risk category derived from the score.
    pub category: RiskCategory,
    /// Weighted factors behind the composite.
    pub factors: Vec<RiskFactor>,
    /// Operator recommendation text.
    pub recommendation: String,
    /// Scoring timestamp.
    pub timestamp: Timestamp,
}

/// Aggregated financial exposure from detected anomalies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialExposure {
    /// Monthly cost of unresolved anomalies in USD.
    pub total_monthly_cost: f64,
    /// Annualized cost in USD.
    pub total_annual_cost: f64,
    /// Potential monthly savings in USD.
    pub potential_savings: f64,
    /// Savings after the risk haircut in USD.
    pub risk_adjusted_savings: f64,
}

// ============================================================================
// SECTION: Framework Compliance
// ============================================================================

/// Result of a stablecoin-framework compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkCheck {
    /// Framework identifier, for example `GENIUS_ACT` or `EU_MICA`.
    pub framework: String,
    /// Whether the checked activity is compliant.
    pub compliant: bool,
    /// Violations found, if any.
    pub violations: Vec<String>,
    /// Check confidence in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable detail line.
    pub details: String,
    /// Check timestamp.
    pub timestamp: Timestamp,
}
