// crates/verdant-core/src/core/identifiers.rs
// ============================================================================
// Module: Verdant Identifiers
// Description: Canonical agent roles and opaque identifiers for Verdant runs.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Verdant.
//! Agent roles form a closed set because routing dispatches on them; thread,
//! building, ticket, and source identifiers are opaque strings validated at
//! runtime boundaries rather than within these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Agent Roles
// ============================================================================

/// Agent roles participating in the anomaly-response pipeline.
///
/// # Invariants
/// - Variants are stable for serialization and checkpoint compatibility.
/// - [`AgentId::Finalize`] aggregates and never signs decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    /// Anomaly detection agent.
    Vanguard,
    /// Regulatory compliance agent.
    Jurist,
    /// ROI simulation and scene generation agent.
    Architect,
    /// Human-in-the-loop approval agent.
    Governor,
    /// Execution completion aggregator.
    Finalize,
}

/// Agent roles that own a signing keypair, in pipeline order.
pub const SIGNING_AGENTS: [AgentId; 4] =
    [AgentId::Vanguard, AgentId::Jurist, AgentId::Architect, AgentId::Governor];

/// All agent roles, in pipeline order.
pub const ALL_AGENTS: [AgentId; 5] = [
    AgentId::Vanguard,
    AgentId::Jurist,
    AgentId::Architect,
    AgentId::Governor,
    AgentId::Finalize,
];

impl AgentId {
    /// Returns the stable snake_case string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vanguard => "vanguard",
            Self::Jurist => "jurist",
            Self::Architect => "architect",
            Self::Governor => "governor",
            Self::Finalize => "finalize",
        }
    }

    /// Returns the uppercase display name used in feed events.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vanguard => "VANGUARD",
            Self::Jurist => "JURIST",
            Self::Architect => "ARCHITECT",
            Self::Governor => "GOVERNOR",
            Self::Finalize => "SYSTEM",
        }
    }

    /// Parses a stable string form back into a role.
    #[must_use]
    pub fn from_str_form(value: &str) -> Option<Self> {
        match value {
            "vanguard" => Some(Self::Vanguard),
            "jurist" => Some(Self::Jurist),
            "architect" => Some(Self::Architect),
            "governor" => Some(Self::Governor),
            "finalize" => Some(Self::Finalize),
            _ => None,
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Thread identifier scoping one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Creates a new thread identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ThreadId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ThreadId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Building identifier targeted by telemetry scans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(String);

impl BuildingId {
    /// Creates a new building identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for BuildingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BuildingId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Maintenance ticket identifier issued by the ticket tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Creates a new ticket identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TicketId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Logical name of a cited data source (for example `bms:energy:HQ-01`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new source identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
