// crates/verdant-adapters/src/lib.rs
// ============================================================================
// Module: Verdant Adapters Library
// Description: Reference implementations of the Verdant adapter interfaces.
// Purpose: Provide simulated external collaborators for demos and tests.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! Reference adapters behind the core interfaces: a seeded telemetry
//! simulator, an in-memory ticket tracker, the regulatory registry, a
//! simulated settlement ledger, risk scoring, the clinical energy auditor,
//! the upskill engine, the dashboard intent engine, and the no-op feed
//! enricher. All are deterministic; production hosts swap in real backends
//! per interface.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod enrich;
pub mod fhir;
pub mod fintech;
pub mod intent;
pub mod regulatory;
pub mod risk;
pub mod settlement;
pub mod telemetry;
pub mod tickets;
pub mod upskill;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use verdant_core::AdapterSet;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use enrich::NoopEnricher;
pub use fhir::ClinicalAuditor;
pub use fhir::benchmark;
pub use fintech::RuleBasedFintech;
pub use intent::DashboardIntentEngine;
pub use regulatory::InMemoryRegulatoryRegistry;
pub use risk::RiskEngine;
pub use risk::financial_exposure;
pub use settlement::SettlementLedger;
pub use telemetry::TelemetrySimulator;
pub use tickets::InMemoryTicketTracker;
pub use upskill::FrictionAdvisor;

// ============================================================================
// SECTION: Default Adapter Set
// ============================================================================

/// Builds an adapter set backed entirely by the simulated adapters.
///
/// The returned simulator handle is shared with the set so hosts can inject
/// demo anomalies into subsequent scans.
#[must_use]
pub fn simulated_adapters(telemetry_seed: u64) -> (AdapterSet, Arc<TelemetrySimulator>) {
    let telemetry = Arc::new(TelemetrySimulator::with_seed(telemetry_seed));
    let set = AdapterSet {
        telemetry: telemetry.clone(),
        tickets: Arc::new(InMemoryTicketTracker::new()),
        regulatory: Arc::new(InMemoryRegulatoryRegistry::new()),
        settlement: Arc::new(SettlementLedger::default()),
        risk: Arc::new(RiskEngine::new()),
        fhir: Arc::new(ClinicalAuditor::new()),
        upskill: Arc::new(FrictionAdvisor::new()),
        fintech: Arc::new(RuleBasedFintech::new()),
        enricher: Arc::new(NoopEnricher::new()),
    };
    (set, telemetry)
}
