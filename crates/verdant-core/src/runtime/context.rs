// crates/verdant-core/src/runtime/context.rs
// ============================================================================
// Module: Verdant Step Context
// Description: Step inputs, step results, and runtime configuration.
// Purpose: Bundle the collaborators a step may consult and type its outputs.
// Dependencies: serde, thiserror, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Steps are pure functions over `(&ExecutionState, &StepContext)`: they never
//! mutate input state and return a [`StepResult`] the runtime interprets. The
//! context bundles adapters, the identity store, the clock, and, for governor
//! re-entry, the bound human response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::AgentId;
use crate::core::BuildingId;
use crate::core::DecisionTrace;
use crate::core::HashError;
use crate::core::HumanResponse;
use crate::core::IdentityError;
use crate::core::IdentityStore;
use crate::core::InterruptPayload;
use crate::core::StateDelta;
use crate::core::ThreadId;
use crate::core::Timestamp;
use crate::core::sign_trace;
use crate::interfaces::AdapterError;
use crate::interfaces::Clock;
use crate::interfaces::FeedEnricher;
use crate::interfaces::FhirAuditor;
use crate::interfaces::FintechCompliance;
use crate::interfaces::RegulatoryRegistry;
use crate::interfaces::RiskScorer;
use crate::interfaces::SettlementEngine;
use crate::interfaces::TelemetryProvider;
use crate::interfaces::TicketTracker;
use crate::interfaces::UpskillAdvisor;

// ============================================================================
// SECTION: Runtime Configuration
// ============================================================================

/// Configuration for the Verdant orchestrator.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Building targeted by vanguard scans.
    pub building_id: BuildingId,
    /// Hard cap on total step dispatches per thread.
    pub recursion_limit: u32,
    /// Optional wall-clock budget per step in milliseconds.
    pub step_timeout_ms: Option<u64>,
    /// Base URL embedded in discovery cards.
    pub base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            building_id: BuildingId::new("HQ-01"),
            recursion_limit: 25,
            step_timeout_ms: None,
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Adapter Set
// ============================================================================

/// External collaborators consulted by the agent steps.
#[derive(Clone)]
pub struct AdapterSet {
    /// Building telemetry source.
    pub telemetry: Arc<dyn TelemetryProvider + Send + Sync>,
    /// Maintenance ticket tracker.
    pub tickets: Arc<dyn TicketTracker + Send + Sync>,
    /// Regulatory article registry.
    pub regulatory: Arc<dyn RegulatoryRegistry + Send + Sync>,
    /// Stablecoin settlement ledger.
    pub settlement: Arc<dyn SettlementEngine + Send + Sync>,
    /// Composite risk scorer.
    pub risk: Arc<dyn RiskScorer + Send + Sync>,
    /// Clinical energy auditor.
    pub fhir: Arc<dyn FhirAuditor + Send + Sync>,
    /// Operator friction detector and lesson recommender.
    pub upskill: Arc<dyn UpskillAdvisor + Send + Sync>,
    /// Stablecoin-framework compliance checker.
    pub fintech: Arc<dyn FintechCompliance + Send + Sync>,
    /// Optional feed text enricher.
    pub enricher: Arc<dyn FeedEnricher + Send + Sync>,
}

// ============================================================================
// SECTION: Step Errors
// ============================================================================

/// Errors raised by agent steps.
#[derive(Debug, Error)]
pub enum StepError {
    /// Identity store failure while signing.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Canonicalization or hashing failure.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// Required adapter failure the step cannot absorb.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// Step exceeded its wall-clock budget.
    #[error("step exceeded time budget: {elapsed_ms}ms > {budget_ms}ms")]
    TimeBudgetExceeded {
        /// Measured step duration.
        elapsed_ms: u64,
        /// Configured budget.
        budget_ms: u64,
    },
}

// ============================================================================
// SECTION: Step Result
// ============================================================================

/// Output of one step dispatch.
///
/// Every step returns a delta except the governor, which may suspend on first
/// entry and returns a routing command once resumed.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// State delta to merge; routing is decided by the node's router.
    Delta(StateDelta),
    /// Routing directive plus delta, produced by the governor on resume.
    Command {
        /// Node to dispatch next.
        goto: AgentId,
        /// State delta to merge before dispatching.
        update: StateDelta,
    },
    /// Suspension request carrying the interrupt payload.
    Suspended(InterruptPayload),
}

// ============================================================================
// SECTION: Step Context
// ============================================================================

/// Collaborators and inputs available to one step dispatch.
pub struct StepContext<'a> {
    /// Thread being executed.
    pub thread_id: &'a ThreadId,
    /// External adapters.
    pub adapters: &'a AdapterSet,
    /// Agent identity store.
    pub identity: &'a IdentityStore,
    /// Time source.
    pub clock: &'a (dyn Clock + Send + Sync),
    /// Runtime configuration.
    pub config: &'a RuntimeConfig,
    /// Human response bound on governor re-entry.
    pub human_response: Option<HumanResponse>,
}

impl StepContext<'_> {
    /// Returns the current timestamp from the injected clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Signs a decision for an agent, generating a missing key on demand.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] when key material cannot be obtained or the
    /// decision cannot be canonicalized.
    pub fn sign(&self, agent: AgentId, decision: Value) -> Result<DecisionTrace, StepError> {
        let key = match self.identity.signing_key(agent) {
            Ok(key) => key,
            Err(IdentityError::NotFound {
                ..
            }) => self.identity.generate(agent, false)?,
            Err(err) => return Err(err.into()),
        };
        Ok(sign_trace(agent, decision, self.now(), &key)?)
    }
}
