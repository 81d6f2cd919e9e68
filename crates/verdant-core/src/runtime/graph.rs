// crates/verdant-core/src/runtime/graph.rs
// ============================================================================
// Module: Verdant Graph Composition
// Description: Static node map binding step functions to router functions.
// Purpose: Model the cyclic pipeline graph without a runtime pointer graph.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! The graph is a static map from node name to `(step function, router
//! function)` plus a start node. Cycles (jurist back to vanguard, governor
//! back to architect) are expressed by the routers and the governor command,
//! not by the map itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AgentId;
use crate::core::ExecutionState;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;
use crate::runtime::router::Route;
use crate::runtime::router::route_after_architect;
use crate::runtime::router::route_after_finalize;
use crate::runtime::router::route_after_governor;
use crate::runtime::router::route_after_jurist;
use crate::runtime::router::route_after_vanguard;
use crate::runtime::steps::architect_step;
use crate::runtime::steps::finalize_step;
use crate::runtime::steps::governor_step;
use crate::runtime::steps::jurist_step;
use crate::runtime::steps::vanguard_step;

// ============================================================================
// SECTION: Node Specification
// ============================================================================

/// Step function signature shared by every node.
pub type StepFn = fn(&ExecutionState, &StepContext<'_>) -> Result<StepResult, StepError>;

/// Router function signature shared by every node.
pub type RouterFn = fn(&ExecutionState) -> Route;

/// Step and router pair for one graph node.
#[derive(Clone, Copy)]
pub struct NodeSpec {
    /// Step function dispatched for the node.
    pub step: StepFn,
    /// Router consulted after the step's delta is merged.
    pub router: RouterFn,
}

/// Entry node of the pipeline graph.
pub const START_NODE: AgentId = AgentId::Vanguard;

/// Returns the node specification for an agent role.
#[must_use]
pub fn node_spec(node: AgentId) -> NodeSpec {
    match node {
        AgentId::Vanguard => NodeSpec {
            step: vanguard_step,
            router: route_after_vanguard,
        },
        AgentId::Jurist => NodeSpec {
            step: jurist_step,
            router: route_after_jurist,
        },
        AgentId::Architect => NodeSpec {
            step: architect_step,
            router: route_after_architect,
        },
        AgentId::Governor => NodeSpec {
            step: governor_step,
            router: route_after_governor,
        },
        AgentId::Finalize => NodeSpec {
            step: finalize_step,
            router: route_after_finalize,
        },
    }
}
