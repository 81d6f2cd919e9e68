// crates/verdant-core/src/runtime/router.rs
// ============================================================================
// Module: Verdant Routers
// Description: Pure routing functions mapping state to the next node.
// Purpose: Implement the conditional edges of the cyclic pipeline graph.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! One pure function per source node decides the next node or the end of the
//! thread. Routers implement the self-correction loop (jurist back to vanguard
//! on citation failure, capped), the non-compliance escalation to the
//! governor, and the mandatory human breakpoint after the architect. Governor
//! routing is encoded in the command it returns, not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AgentId;
use crate::core::ComplianceStatus;
use crate::core::ExecutionState;
use crate::core::Phase;

// ============================================================================
// SECTION: Route
// ============================================================================

/// Routing outcome of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Dispatch the named node next.
    Node(AgentId),
    /// End the thread.
    End,
}

/// Maximum allowed self-correction iterations to prevent runaway loops.
pub const MAX_ITERATIONS: u32 = 5;

// ============================================================================
// SECTION: Router Functions
// ============================================================================

/// After the vanguard: jurist when anomalies were found, else end.
#[must_use]
pub fn route_after_vanguard(state: &ExecutionState) -> Route {
    if state.anomalies.is_empty() {
        Route::End
    } else {
        Route::Node(AgentId::Jurist)
    }
}

/// After the jurist: route on citation validity and compliance.
///
/// Citation failure loops back to the vanguard until [`MAX_ITERATIONS`];
/// non-compliance escalates straight to the governor; otherwise the architect
/// simulates remediation.
#[must_use]
pub fn route_after_jurist(state: &ExecutionState) -> Route {
    if state.current_phase == Phase::CitationFailure {
        if state.iteration_count >= MAX_ITERATIONS {
            return Route::End;
        }
        return Route::Node(AgentId::Vanguard);
    }

    let status = state.compliance_report.as_ref().map(|report| report.status);
    if status == Some(ComplianceStatus::NonCompliant) {
        return Route::Node(AgentId::Governor);
    }
    Route::Node(AgentId::Architect)
}

/// After the architect: always the governor; the human breakpoint is mandatory.
#[must_use]
pub const fn route_after_architect(_state: &ExecutionState) -> Route {
    Route::Node(AgentId::Governor)
}

/// After the governor: unreachable by routing; the governor encodes its
/// destination in the command it returns. Declared for router totality.
#[must_use]
pub const fn route_after_governor(_state: &ExecutionState) -> Route {
    Route::End
}

/// After the finalizer: always end.
#[must_use]
pub const fn route_after_finalize(_state: &ExecutionState) -> Route {
    Route::End
}
