// crates/verdant-core/src/core/mod.rs
// ============================================================================
// Module: Verdant Core Types
// Description: Canonical data model for the anomaly-response pipeline.
// Purpose: Group identifiers, trust primitives, state, and domain records.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! The core module holds every serialized type the runtime persists or
//! observers consume: identifiers, the trust substrate (identity, citations,
//! traces), the merged execution state, and the domain records contributed by
//! adapters.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod anomaly;
pub mod citation;
pub mod compliance;
pub mod discovery;
pub mod edutech;
pub mod events;
pub mod fintech;
pub mod hashing;
pub mod health;
pub mod identifiers;
pub mod identity;
pub mod media;
pub mod proof;
pub mod simulation;
pub mod state;
pub mod telemetry;
pub mod tickets;
pub mod time;
pub mod trace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use anomaly::AnomalyRecord;
pub use anomaly::ENERGY_SPIKE;
pub use anomaly::Severity;
pub use anomaly::WATER_SPIKE;
pub use citation::CitationBlock;
pub use citation::CitationSource;
pub use citation::SNIPPET_MAX_LEN;
pub use citation::citation_matches;
pub use citation::citations_present;
pub use citation::cite;
pub use compliance::Article;
pub use compliance::ArticleRef;
pub use compliance::ComplianceCheck;
pub use compliance::ComplianceFinding;
pub use compliance::ComplianceReport;
pub use compliance::ComplianceStatus;
pub use compliance::RegulatoryQueryResult;
pub use discovery::AgentCard;
pub use discovery::agent_card;
pub use discovery::all_agent_cards;
pub use discovery::orchestrator_card;
pub use edutech::FrictionKind;
pub use edutech::FrictionMetrics;
pub use edutech::FrictionSignal;
pub use edutech::UpskillHint;
pub use edutech::UpskillUrgency;
pub use events::DialogMessage;
pub use events::EventKind;
pub use events::UiEvent;
pub use fintech::FinancialExposure;
pub use fintech::FrameworkCheck;
pub use fintech::RiskCategory;
pub use fintech::RiskFactor;
pub use fintech::RiskScore;
pub use fintech::SettlementReceipt;
pub use fintech::SettlementRequest;
pub use fintech::SettlementStatus;
pub use hashing::DIGEST_HEX_LEN;
pub use hashing::HashError;
pub use hashing::canonical_json_bytes;
pub use hashing::is_hex_digest;
pub use hashing::sha256_hex;
pub use hashing::sha256_hex_canonical;
pub use health::ClinicalEnergyAudit;
pub use health::FacilityBenchmark;
pub use health::FhirObservation;
pub use identifiers::ALL_AGENTS;
pub use identifiers::AgentId;
pub use identifiers::BuildingId;
pub use identifiers::SIGNING_AGENTS;
pub use identifiers::SourceId;
pub use identifiers::ThreadId;
pub use identifiers::TicketId;
pub use identity::IdentityError;
pub use identity::IdentityStore;
pub use media::DashboardConfig;
pub use media::InteractionTelemetry;
pub use media::UserIntent;
pub use proof::build_proof_graph;
pub use simulation::RoiDetail;
pub use simulation::SceneData;
pub use simulation::SceneEdge;
pub use simulation::SceneNode;
pub use simulation::ScenePosition;
pub use simulation::SimulationResult;
pub use state::CheckpointRecord;
pub use state::ExecutionState;
pub use state::HumanResponse;
pub use state::InterruptPayload;
pub use state::Phase;
pub use state::RunStatus;
pub use state::StateDelta;
pub use telemetry::ResourceKind;
pub use telemetry::TelemetryReading;
pub use telemetry::TelemetryReport;
pub use telemetry::TelemetrySnapshot;
pub use telemetry::TelemetrySummary;
pub use tickets::TicketDraft;
pub use tickets::TicketPriority;
pub use tickets::TicketRecord;
pub use tickets::TicketStatus;
pub use time::Timestamp;
pub use trace::DecisionTrace;
pub use trace::VerifiedTrace;
pub use trace::sign_trace;
pub use trace::verify_trace;
