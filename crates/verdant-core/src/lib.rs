// crates/verdant-core/src/lib.rs
// ============================================================================
// Module: Verdant Core Library
// Description: Public API surface for the Verdant core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Verdant core provides a durable, cyclic multi-agent orchestrator for
//! governed anomaly response: telemetry detection, cited compliance
//! evaluation, ROI simulation, a mandatory human breakpoint, and signed
//! finalization with a cryptographic proof graph. It is backend-agnostic and
//! integrates through explicit interfaces rather than embedding adapters.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AdapterError;
pub use interfaces::CheckpointStore;
pub use interfaces::Clock;
pub use interfaces::EnrichError;
pub use interfaces::FeedEnricher;
pub use interfaces::FhirAuditor;
pub use interfaces::FintechCompliance;
pub use interfaces::FixedClock;
pub use interfaces::IntentAnalyzer;
pub use interfaces::RegulatoryRegistry;
pub use interfaces::RiskScorer;
pub use interfaces::SettlementEngine;
pub use interfaces::StoreError;
pub use interfaces::SystemClock;
pub use interfaces::TelemetryProvider;
pub use interfaces::TicketTracker;
pub use interfaces::UpskillAdvisor;
pub use runtime::AdapterSet;
pub use runtime::InMemoryCheckpointStore;
pub use runtime::Orchestrator;
pub use runtime::OrchestratorError;
pub use runtime::RuntimeConfig;
pub use runtime::SharedCheckpointStore;
pub use runtime::StepContext;
pub use runtime::StepError;
pub use runtime::StepResult;
pub use runtime::StreamEvent;
pub use runtime::ThreadStatus;
