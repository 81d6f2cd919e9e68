// crates/verdant-core/tests/discovery.rs
// ============================================================================
// Module: Discovery Tests
// Description: Tests for role cards and the orchestrator card.
// ============================================================================
//! ## Overview
//! Validates the discovery document lists every role with live public keys
//! for signing agents and an empty key for the finalizer.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use verdant_core::AgentId;
use verdant_core::IdentityStore;
use verdant_core::agent_card;
use verdant_core::all_agent_cards;
use verdant_core::orchestrator_card;

// ============================================================================
// SECTION: Role Cards
// ============================================================================

/// Tests one card is generated per pipeline role.
#[test]
fn test_all_roles_have_cards() {
    let dir = tempfile::tempdir().unwrap();
    let identity = IdentityStore::new(dir.path());
    identity.ensure_all().unwrap();

    let cards = all_agent_cards(&identity, "http://localhost:8000");
    assert_eq!(cards.len(), 5);

    let ids: Vec<&str> = cards.iter().map(|card| card.agent_id.as_str()).collect();
    assert_eq!(ids, vec!["vanguard", "jurist", "architect", "governor", "finalize"]);
}

/// Tests signing roles carry a live 44-char public key.
#[test]
fn test_signing_roles_expose_public_keys() {
    let dir = tempfile::tempdir().unwrap();
    let identity = IdentityStore::new(dir.path());
    identity.ensure_all().unwrap();

    let card = agent_card(AgentId::Vanguard, &identity, "http://localhost:8000");
    assert_eq!(card.public_key_b64.len(), 44);
}

/// Tests the finalizer card has no key; it does not sign.
#[test]
fn test_finalizer_has_no_key() {
    let dir = tempfile::tempdir().unwrap();
    let identity = IdentityStore::new(dir.path());
    identity.ensure_all().unwrap();

    let card = agent_card(AgentId::Finalize, &identity, "http://localhost:8000");
    assert!(card.public_key_b64.is_empty());
}

// ============================================================================
// SECTION: Orchestrator Card
// ============================================================================

/// Tests the orchestrator card lists every role in its metadata.
#[test]
fn test_orchestrator_card_lists_agents() {
    let card = orchestrator_card("http://localhost:8000");
    let agents = card.metadata.get("agents").and_then(|value| value.as_array()).unwrap();
    assert_eq!(agents.len(), 5);
    assert_eq!(card.endpoint, "http://localhost:8000/api");
}
