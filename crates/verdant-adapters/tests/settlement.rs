// crates/verdant-adapters/tests/settlement.rs
// ============================================================================
// Module: Settlement Ledger Tests
// Description: Tests for wallets, transfers, and failure receipts.
// ============================================================================
//! ## Overview
//! Validates deterministic wallet derivation, balance movement on confirmed
//! transfers, and failed receipts on insufficient balance.

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

use verdant_adapters::SettlementLedger;
use verdant_core::SettlementEngine;
use verdant_core::SettlementRequest;
use verdant_core::SettlementStatus;
use verdant_core::Timestamp;

/// Fixed timestamp for ledger tests.
fn ts() -> Timestamp {
    Timestamp::new("2026-01-01T00:00:00Z")
}

/// Builds a transfer request for the given amount.
fn request(amount: f64) -> SettlementRequest {
    SettlementRequest {
        from_agent: "architect".to_string(),
        to_agent: "governor".to_string(),
        amount_usdc: amount,
        memo: "service fee".to_string(),
    }
}

// ============================================================================
// SECTION: Transfers
// ============================================================================

/// Tests a confirmed transfer moves balances and records a receipt.
#[test]
fn test_confirmed_settlement() {
    let ledger = SettlementLedger::default();
    let receipt = ledger.settle(&request(25.0), ts()).unwrap();

    assert_eq!(receipt.status, SettlementStatus::Confirmed);
    assert_eq!(receipt.tx_signature.len(), 64);
    assert!(receipt.block_hash.is_some());
    assert!((ledger.balance("architect").unwrap() - 9_975.0).abs() < 1e-6);
    assert!((ledger.balance("governor").unwrap() - 10_025.0).abs() < 1e-6);
    assert_eq!(ledger.receipts().unwrap().len(), 1);
}

/// Tests an overdraft yields a failed receipt without moving funds.
#[test]
fn test_insufficient_balance_fails() {
    let ledger = SettlementLedger::default();
    let receipt = ledger.settle(&request(1_000_000.0), ts()).unwrap();

    assert_eq!(receipt.status, SettlementStatus::Failed);
    assert!(receipt.block_hash.is_none());
    assert!((ledger.balance("architect").unwrap() - 10_000.0).abs() < 1e-6);
}

/// Tests wallet addresses are deterministic per agent.
#[test]
fn test_wallet_address_is_deterministic() {
    let ledger = SettlementLedger::default();
    assert_eq!(ledger.wallet_address("architect"), ledger.wallet_address("architect"));
    assert_ne!(ledger.wallet_address("architect"), ledger.wallet_address("governor"));
}

/// Tests transaction signatures are unique per transfer.
#[test]
fn test_signatures_are_unique() {
    let ledger = SettlementLedger::default();
    let first = ledger.settle(&request(1.0), ts()).unwrap();
    let second = ledger.settle(&request(1.0), ts()).unwrap();
    assert_ne!(first.tx_signature, second.tx_signature);
}
