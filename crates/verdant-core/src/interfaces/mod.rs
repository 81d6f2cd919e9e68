// crates/verdant-core/src/interfaces/mod.rs
// ============================================================================
// Module: Verdant Interfaces
// Description: Backend-agnostic interfaces for time, storage, and adapters.
// Purpose: Define the contract surfaces used by the Verdant runtime.
// Dependencies: serde, thiserror, time, crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the runtime integrates with external collaborators
//! without embedding backend-specific details. Checkpoint stores must be safe
//! for concurrent access by distinct threads; adapter implementations are
//! best-effort collaborators whose failures never abort a thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::AnomalyRecord;
use crate::core::BuildingId;
use crate::core::CheckpointRecord;
use crate::core::ClinicalEnergyAudit;
use crate::core::ComplianceCheck;
use crate::core::DashboardConfig;
use crate::core::FrameworkCheck;
use crate::core::FrictionMetrics;
use crate::core::FrictionSignal;
use crate::core::InteractionTelemetry;
use crate::core::RegulatoryQueryResult;
use crate::core::RiskScore;
use crate::core::SettlementReceipt;
use crate::core::SettlementRequest;
use crate::core::TelemetryReport;
use crate::core::ThreadId;
use crate::core::TicketDraft;
use crate::core::TicketId;
use crate::core::TicketRecord;
use crate::core::TicketStatus;
use crate::core::Timestamp;
use crate::core::UpskillHint;
use crate::core::UserIntent;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Time source supplying RFC 3339 timestamps to the runtime.
///
/// The runtime never reads wall-clock time directly; hosts inject a clock so
/// replays can pin time.
pub trait Clock {
    /// Returns the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Wall-clock backed [`Clock`] for production hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let formatted = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"));
        Timestamp::new(formatted)
    }
}

/// Fixed-time [`Clock`] for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// Timestamp returned by every call.
    timestamp: Timestamp,
}

impl FixedClock {
    /// Creates a clock pinned to the given timestamp.
    #[must_use]
    pub fn new(timestamp: impl Into<Timestamp>) -> Self {
        Self {
            timestamp: timestamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp.clone()
    }
}

// ============================================================================
// SECTION: Checkpoint Store
// ============================================================================

/// Checkpoint store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("checkpoint store io error: {0}")]
    Io(String),
    /// Stored data failed to serialize or deserialize.
    #[error("checkpoint store serialization error: {0}")]
    Serialization(String),
    /// Store reported an error.
    #[error("checkpoint store error: {0}")]
    Store(String),
}

/// Append-only per-thread checkpoint store.
///
/// Implementations must be safe for concurrent access by distinct thread ids;
/// the runtime serializes access within a thread id.
pub trait CheckpointStore {
    /// Appends a checkpoint for a thread.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn append(&self, thread_id: &ThreadId, record: &CheckpointRecord) -> Result<(), StoreError>;

    /// Loads the latest checkpoint for a thread.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn latest(&self, thread_id: &ThreadId) -> Result<Option<CheckpointRecord>, StoreError>;

    /// Loads the full checkpoint history for a thread, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn history(&self, thread_id: &ThreadId) -> Result<Vec<CheckpointRecord>, StoreError>;
}

// ============================================================================
// SECTION: Adapter Errors
// ============================================================================

/// Errors raised by external adapters.
///
/// Adapter failures are caught by the calling step: the contribution is
/// omitted and the step succeeds.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Adapter reported an error.
    #[error("adapter error: {0}")]
    Failed(String),
}

// ============================================================================
// SECTION: Telemetry Provider
// ============================================================================

/// Building telemetry source consumed by the vanguard.
pub trait TelemetryProvider {
    /// Fetches the energy telemetry report for a building.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when telemetry cannot be fetched.
    fn energy(&self, building_id: &BuildingId, hours: u32) -> Result<TelemetryReport, AdapterError>;

    /// Fetches the water telemetry report for a building.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when telemetry cannot be fetched.
    fn water(&self, building_id: &BuildingId, hours: u32) -> Result<TelemetryReport, AdapterError>;
}

// ============================================================================
// SECTION: Ticket Tracker
// ============================================================================

/// Maintenance ticket tracker consumed by the architect and finalizer.
pub trait TicketTracker {
    /// Creates a ticket from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when creation fails.
    fn create(
        &self,
        draft: &TicketDraft,
        created_at: Timestamp,
    ) -> Result<TicketRecord, AdapterError>;

    /// Updates the status of an existing ticket.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the ticket is unknown.
    fn update_status(
        &self,
        ticket_id: &TicketId,
        status: TicketStatus,
        updated_at: Timestamp,
    ) -> Result<TicketRecord, AdapterError>;

    /// Lists open tickets for a building.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when listing fails.
    fn open_tickets(&self, building_id: &BuildingId) -> Result<Vec<TicketRecord>, AdapterError>;
}

// ============================================================================
// SECTION: Regulatory Registry
// ============================================================================

/// Regulatory article registry consumed by the jurist.
pub trait RegulatoryRegistry {
    /// Queries articles by section or keyword; no filter returns all.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the query fails.
    fn query(
        &self,
        section: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<RegulatoryQueryResult, AdapterError>;

    /// Evaluates an action description against the registry's compliance vectors.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when evaluation fails.
    fn check_compliance_vector(
        &self,
        action_description: &str,
        risk_level: &str,
    ) -> Result<ComplianceCheck, AdapterError>;
}

// ============================================================================
// SECTION: Settlement Engine
// ============================================================================

/// Stablecoin settlement ledger consumed by the finalizer.
pub trait SettlementEngine {
    /// Settles an agent-to-agent service fee.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the ledger rejects the request outright;
    /// insufficient balances yield a failed receipt instead.
    fn settle(
        &self,
        request: &SettlementRequest,
        settled_at: Timestamp,
    ) -> Result<SettlementReceipt, AdapterError>;
}

// ============================================================================
// SECTION: Risk Scorer
// ============================================================================

/// Composite risk scorer consumed by the finalizer.
pub trait RiskScorer {
    /// Scores an operation from anomalies, compliance posture, and exposure.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when scoring fails.
    fn score(
        &self,
        anomalies: &[AnomalyRecord],
        compliance_status: &str,
        financial_exposure: f64,
        scored_at: Timestamp,
    ) -> Result<RiskScore, AdapterError>;
}

// ============================================================================
// SECTION: FHIR Auditor
// ============================================================================

/// Clinical energy auditor consumed by the finalizer.
pub trait FhirAuditor {
    /// Audits facility energy efficiency against sector benchmarks.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when auditing fails.
    fn audit(
        &self,
        facility_id: &BuildingId,
        energy_readings: &[f64],
        facility_type: &str,
        sqft: f64,
        audited_at: Timestamp,
    ) -> Result<ClinicalEnergyAudit, AdapterError>;
}

// ============================================================================
// SECTION: Upskill Advisor
// ============================================================================

/// Operator friction detector and lesson recommender consumed by the finalizer.
pub trait UpskillAdvisor {
    /// Detects cognitive friction signals from interaction metrics.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when detection fails.
    fn detect(
        &self,
        metrics: &FrictionMetrics<'_>,
        detected_at: Timestamp,
    ) -> Result<Vec<FrictionSignal>, AdapterError>;

    /// Generates upskill recommendations for detected signals.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when generation fails.
    fn recommend(
        &self,
        signals: &[FrictionSignal],
        recommended_at: Timestamp,
    ) -> Result<Vec<UpskillHint>, AdapterError>;
}

// ============================================================================
// SECTION: Fintech Compliance
// ============================================================================

/// Stablecoin-framework compliance checker consumed by the finalizer.
pub trait FintechCompliance {
    /// Verifies a transaction against the GENIUS Act provisions.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the check fails.
    fn check_genius_act(
        &self,
        transaction_type: &str,
        amount_usd: f64,
        agent_ids: &[String],
        checked_at: Timestamp,
    ) -> Result<FrameworkCheck, AdapterError>;

    /// Verifies a settlement against the EU MiCA provisions.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the check fails.
    fn check_mica(
        &self,
        settlement_type: &str,
        amount_eur: f64,
        cross_border: bool,
        checked_at: Timestamp,
    ) -> Result<FrameworkCheck, AdapterError>;
}

// ============================================================================
// SECTION: Intent Analyzer
// ============================================================================

/// Dashboard personalization engine consumed by the façade.
pub trait IntentAnalyzer {
    /// Infers operator intent from interaction telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when inference fails.
    fn analyse(
        &self,
        telemetry: &InteractionTelemetry,
        analysed_at: Timestamp,
    ) -> Result<UserIntent, AdapterError>;

    /// Derives a dashboard configuration from inferred intent.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when derivation fails.
    fn dashboard(&self, intent: &UserIntent) -> Result<DashboardConfig, AdapterError>;
}

// ============================================================================
// SECTION: Feed Enricher
// ============================================================================

/// Enrichment errors.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Enrichment is disabled; callers use their deterministic text.
    #[error("enrichment disabled")]
    Disabled,
    /// Enricher reported an error.
    #[error("enrichment error: {0}")]
    Failed(String),
}

/// Optional post-processor for feed event text.
///
/// The deterministic path must always produce valid output without it; any
/// failure falls back to the caller-provided text.
pub trait FeedEnricher {
    /// Rewrites a feed line given a prompt; returns the enriched text.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError`] when enrichment fails; callers fall back to
    /// their deterministic text.
    fn enrich(&self, prompt: &str) -> Result<String, EnrichError>;
}
