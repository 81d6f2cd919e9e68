// crates/verdant-core/src/runtime/span.rs
// ============================================================================
// Module: Verdant Step Spans
// Description: Per-dispatch duration and outcome records.
// Purpose: Capture observability data for every step without an exporter.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! Every step dispatch is wrapped in a span recording its duration and
//! outcome. Spans accumulate in the orchestrator's per-thread dispatch log and
//! are queryable by hosts; they never influence execution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::AgentId;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Span Records
// ============================================================================

/// Outcome of one step dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanOutcome {
    /// Step returned a delta or command.
    Completed,
    /// Step suspended at the human breakpoint.
    Suspended,
    /// Step failed.
    Failed {
        /// Failure description.
        reason: String,
    },
}

/// Duration and outcome record for one step dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpan {
    /// Node that was dispatched.
    pub agent: AgentId,
    /// Dispatch start timestamp.
    pub started_at: Timestamp,
    /// Measured wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Dispatch outcome.
    pub outcome: SpanOutcome,
}
