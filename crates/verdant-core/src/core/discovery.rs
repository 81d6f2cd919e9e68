// crates/verdant-core/src/core/discovery.rs
// ============================================================================
// Module: Verdant Agent Discovery
// Description: Role cards and orchestrator card for agent interoperability.
// Purpose: Expose agent identities, capabilities, and public keys to peers.
// Dependencies: serde, serde_json, crate::core::{identifiers, identity}
// ============================================================================

//! ## Overview
//! The discovery document lists one card per pipeline role plus an
//! orchestrator card. Cards carry the live base64 public key for signing
//! roles; serialization of the document is a façade concern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::core::identifiers::ALL_AGENTS;
use crate::core::identifiers::AgentId;
use crate::core::identity::IdentityStore;

// ============================================================================
// SECTION: Agent Card
// ============================================================================

/// Discovery card describing one agent or the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCard {
    /// Stable agent identifier.
    pub agent_id: String,
    /// Display name.
    pub name: String,
    /// Capability description.
    pub description: String,
    /// Card version.
    pub version: String,
    /// Capability labels.
    pub capabilities: Vec<String>,
    /// Supported protocol labels.
    pub protocols: Vec<String>,
    /// Service endpoint path.
    pub endpoint: String,
    /// Authentication scheme label.
    pub authentication: String,
    /// Base64 public key; empty for non-signing roles.
    pub public_key_b64: String,
    /// Availability status label.
    pub status: String,
    /// Free-form metadata.
    pub metadata: Value,
}

// ============================================================================
// SECTION: Role Definitions
// ============================================================================

/// Static display name, description, and capabilities for a role.
struct RoleDefinition {
    /// Display name.
    name: &'static str,
    /// Capability description.
    description: &'static str,
    /// Capability labels.
    capabilities: &'static [&'static str],
}

/// Returns the static definition for a role.
const fn role_definition(agent: AgentId) -> RoleDefinition {
    match agent {
        AgentId::Vanguard => RoleDefinition {
            name: "The Vanguard",
            description: "Autonomous anomaly detection agent. Ingests building telemetry to \
                          detect energy and water anomalies with threshold analysis.",
            capabilities: &[
                "telemetry_ingestion",
                "anomaly_detection",
                "data_citation",
                "trace_signing",
            ],
        },
        AgentId::Jurist => RoleDefinition {
            name: "The Jurist",
            description: "Regulatory compliance evaluation agent. Verifies citations and \
                          classifies detected anomalies against the regulatory registry.",
            capabilities: &[
                "compliance_evaluation",
                "regulatory_query",
                "citation_verification",
                "risk_classification",
            ],
        },
        AgentId::Architect => RoleDefinition {
            name: "The Architect",
            description: "ROI simulation and digital-twin agent. Runs what-if scenarios, \
                          computes NPV and payback, and generates scene data.",
            capabilities: &[
                "roi_analysis",
                "npv_computation",
                "scene_generation",
                "ticket_drafting",
            ],
        },
        AgentId::Governor => RoleDefinition {
            name: "The Governor",
            description: "Human-in-the-loop breakpoint agent. Mandatory approval checkpoint \
                          for state-mutating actions.",
            capabilities: &[
                "hitl_approval",
                "roi_adjustment",
                "action_gating",
                "threshold_enforcement",
            ],
        },
        AgentId::Finalize => RoleDefinition {
            name: "The Finalizer",
            description: "Execution completion agent. Submits tickets, settles service fees, \
                          and generates the signed proof graph.",
            capabilities: &[
                "ticket_submission",
                "proof_graph_generation",
                "settlement_trigger",
                "audit_trail",
            ],
        },
    }
}

// ============================================================================
// SECTION: Card Generation
// ============================================================================

/// Generates the discovery card for one agent role.
///
/// The public key is resolved from the identity store; non-signing roles and
/// unresolvable keys yield an empty key field.
#[must_use]
pub fn agent_card(agent: AgentId, identity: &IdentityStore, base_url: &str) -> AgentCard {
    let definition = role_definition(agent);
    let public_key_b64 = identity.public_key_b64(agent).unwrap_or_default();

    AgentCard {
        agent_id: agent.as_str().to_string(),
        name: definition.name.to_string(),
        description: definition.description.to_string(),
        version: "0.1.0".to_string(),
        capabilities: definition.capabilities.iter().map(ToString::to_string).collect(),
        protocols: vec!["a2a/1.0".to_string()],
        endpoint: format!("{base_url}/api/a2a/agents/{}", agent.as_str()),
        authentication: "ed25519".to_string(),
        public_key_b64,
        status: "active".to_string(),
        metadata: json!({
            "framework": "verdant",
            "version": "0.1.0",
            "signing_algorithm": "Ed25519",
        }),
    }
}

/// Generates discovery cards for every pipeline role.
#[must_use]
pub fn all_agent_cards(identity: &IdentityStore, base_url: &str) -> Vec<AgentCard> {
    ALL_AGENTS.iter().map(|agent| agent_card(*agent, identity, base_url)).collect()
}

/// Generates the top-level orchestrator card.
#[must_use]
pub fn orchestrator_card(base_url: &str) -> AgentCard {
    AgentCard {
        agent_id: "verdant".to_string(),
        name: "Verdant Orchestrator".to_string(),
        description: "Durable multi-agent orchestrator for governed anomaly response: \
                      detection, compliance, ROI simulation, human approval, and signed \
                      finalization."
            .to_string(),
        version: "0.1.0".to_string(),
        capabilities: vec![
            "multi_agent_orchestration".to_string(),
            "durable_state_machine".to_string(),
            "cryptographic_signing".to_string(),
            "regulatory_compliance".to_string(),
            "stablecoin_settlement".to_string(),
            "fhir_interop".to_string(),
            "friction_detection".to_string(),
        ],
        protocols: vec!["a2a/1.0".to_string()],
        endpoint: format!("{base_url}/api"),
        authentication: "ed25519".to_string(),
        public_key_b64: String::new(),
        status: "active".to_string(),
        metadata: json!({
            "agents": ALL_AGENTS.iter().map(|agent| agent.as_str()).collect::<Vec<_>>(),
            "documentation": format!("{base_url}/docs"),
        }),
    }
}
