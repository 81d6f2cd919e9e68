// crates/verdant-adapters/src/tickets.rs
// ============================================================================
// Module: Verdant Ticket Tracker Stub
// Description: In-memory maintenance ticket tracker.
// Purpose: Simulate ticket lifecycle management for autonomous maintenance.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! An in-memory ticket tracker with sequential `ECO-xxxxx` identifiers and
//! automatic assignee routing. In production this surface would call a real
//! ticketing REST API.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use verdant_core::AdapterError;
use verdant_core::BuildingId;
use verdant_core::TicketDraft;
use verdant_core::TicketId;
use verdant_core::TicketRecord;
use verdant_core::TicketStatus;
use verdant_core::TicketTracker;
use verdant_core::Timestamp;

// ============================================================================
// SECTION: Tracker
// ============================================================================

/// Default assignee used for auto-routed tickets.
const AUTO_ASSIGNEE: &str = "facilities-team";

/// In-memory ticket tracker stub.
#[derive(Debug)]
pub struct InMemoryTicketTracker {
    /// Ticket list protected by a mutex.
    tickets: Mutex<Vec<TicketRecord>>,
    /// Monotonic counter behind issued ticket numbers.
    counter: Mutex<u32>,
}

impl Default for InMemoryTicketTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTicketTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
            counter: Mutex::new(10_000),
        }
    }

    /// Issues the next sequential ticket identifier.
    fn next_id(&self) -> Result<TicketId, AdapterError> {
        let mut counter = self
            .counter
            .lock()
            .map_err(|_| AdapterError::Failed("ticket counter poisoned".to_string()))?;
        *counter += 1;
        Ok(TicketId::new(format!("ECO-{counter:05}")))
    }
}

impl TicketTracker for InMemoryTicketTracker {
    fn create(
        &self,
        draft: &TicketDraft,
        created_at: Timestamp,
    ) -> Result<TicketRecord, AdapterError> {
        let ticket_id = self.next_id()?;
        let record = TicketRecord {
            ticket_id: ticket_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            assignee: AUTO_ASSIGNEE.to_string(),
            building_id: draft.building_id.clone(),
            status: TicketStatus::Open,
            created_at,
            url: format!("https://verdant.atlassian.net/browse/{ticket_id}"),
            updated_at: None,
        };
        self.tickets
            .lock()
            .map_err(|_| AdapterError::Failed("ticket store poisoned".to_string()))?
            .push(record.clone());
        Ok(record)
    }

    fn update_status(
        &self,
        ticket_id: &TicketId,
        status: TicketStatus,
        updated_at: Timestamp,
    ) -> Result<TicketRecord, AdapterError> {
        let mut tickets = self
            .tickets
            .lock()
            .map_err(|_| AdapterError::Failed("ticket store poisoned".to_string()))?;
        for ticket in tickets.iter_mut() {
            if &ticket.ticket_id == ticket_id {
                ticket.status = status;
                ticket.updated_at = Some(updated_at);
                return Ok(ticket.clone());
            }
        }
        Err(AdapterError::Failed(format!("ticket {ticket_id} not found")))
    }

    fn open_tickets(&self, building_id: &BuildingId) -> Result<Vec<TicketRecord>, AdapterError> {
        let tickets = self
            .tickets
            .lock()
            .map_err(|_| AdapterError::Failed("ticket store poisoned".to_string()))?;
        Ok(tickets
            .iter()
            .filter(|ticket| {
                &ticket.building_id == building_id && ticket.status == TicketStatus::Open
            })
            .cloned()
            .collect())
    }
}
