// crates/verdant-core/src/core/tickets.rs
// ============================================================================
// Module: Verdant Ticket Records
// Description: Maintenance ticket records drafted and submitted by the pipeline.
// Purpose: Carry ticket lifecycle data through state and the tracker adapter.
// Dependencies: serde, crate::core::{identifiers, time}
// ============================================================================

//! ## Overview
//! The architect drafts one maintenance ticket per remediation round; the
//! finalizer submits drafted tickets by advancing their status. Ticket
//! identifiers are issued by the tracker adapter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BuildingId;
use crate::core::identifiers::TicketId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Ticket Enums
// ============================================================================

/// Ticket priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Service-impacting; immediate response.
    Critical,
    /// Urgent maintenance.
    High,
    /// Scheduled maintenance.
    Medium,
    /// Backlog item.
    Low,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Ticket lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Drafted, awaiting submission.
    Open,
    /// Submitted and being worked.
    InProgress,
    /// Work finished, awaiting closure.
    Resolved,
    /// Closed.
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Ticket Records
// ============================================================================

/// Draft payload submitted to the ticket tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Requested priority.
    pub priority: TicketPriority,
    /// Building the ticket targets.
    pub building_id: BuildingId,
}

/// Maintenance ticket issued by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Tracker-issued ticket identifier.
    pub ticket_id: TicketId,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Ticket priority.
    pub priority: TicketPriority,
    /// Assigned team or individual.
    pub assignee: String,
    /// Building the ticket targets.
    pub building_id: BuildingId,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Tracker browse URL.
    pub url: String,
    /// Last status-change timestamp, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}
