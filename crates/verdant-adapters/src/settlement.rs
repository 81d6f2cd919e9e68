// crates/verdant-adapters/src/settlement.rs
// ============================================================================
// Module: Verdant Settlement Ledger
// Description: Simulated stablecoin ledger with per-agent wallets.
// Purpose: Settle agent-to-agent service fees with instant confirmation.
// Dependencies: base64, sha2, verdant-core
// ============================================================================

//! ## Overview
//! A fully simulated settlement ledger: each agent receives a deterministic
//! wallet address derived from its identifier and a starting devnet balance.
//! Transfers debit and credit in memory; insufficient balances produce failed
//! receipts rather than errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use sha2::Digest;
use sha2::Sha256;
use verdant_core::AdapterError;
use verdant_core::SettlementEngine;
use verdant_core::SettlementReceipt;
use verdant_core::SettlementRequest;
use verdant_core::SettlementStatus;
use verdant_core::Timestamp;

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Starting devnet balance airdropped to each wallet.
const STARTING_BALANCE: f64 = 10_000.0;

/// Simulated stablecoin settlement ledger.
#[derive(Debug)]
pub struct SettlementLedger {
    /// Ledger network label.
    network: String,
    /// Agent balances.
    balances: Mutex<BTreeMap<String, f64>>,
    /// Confirmed and failed receipts, in order.
    ledger: Mutex<Vec<SettlementReceipt>>,
    /// Monotonic nonce behind transaction signatures.
    nonce: Mutex<u64>,
}

impl Default for SettlementLedger {
    fn default() -> Self {
        Self::new("devnet")
    }
}

impl SettlementLedger {
    /// Creates a ledger for the named network.
    #[must_use]
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            balances: Mutex::new(BTreeMap::new()),
            ledger: Mutex::new(Vec::new()),
            nonce: Mutex::new(0),
        }
    }

    /// Derives the deterministic wallet address for an agent.
    #[must_use]
    pub fn wallet_address(&self, agent_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"verdant:");
        hasher.update(agent_id.as_bytes());
        hasher.update(b":ledger");
        Base64.encode(hasher.finalize())
    }

    /// Returns the current balance for an agent, creating the wallet on demand.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the balance table is poisoned.
    pub fn balance(&self, agent_id: &str) -> Result<f64, AdapterError> {
        let mut balances = self
            .balances
            .lock()
            .map_err(|_| AdapterError::Failed("balance table poisoned".to_string()))?;
        Ok(*balances.entry(agent_id.to_string()).or_insert(STARTING_BALANCE))
    }

    /// Returns every receipt recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the ledger is poisoned.
    pub fn receipts(&self) -> Result<Vec<SettlementReceipt>, AdapterError> {
        let ledger = self
            .ledger
            .lock()
            .map_err(|_| AdapterError::Failed("ledger poisoned".to_string()))?;
        Ok(ledger.clone())
    }

    /// Issues the next transaction signature.
    fn next_signature(&self, request: &SettlementRequest) -> Result<String, AdapterError> {
        let mut nonce = self
            .nonce
            .lock()
            .map_err(|_| AdapterError::Failed("nonce poisoned".to_string()))?;
        *nonce += 1;
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_be_bytes());
        hasher.update(request.from_agent.as_bytes());
        hasher.update(request.to_agent.as_bytes());
        hasher.update(request.amount_usdc.to_be_bytes());
        Ok(hex_encode(&hasher.finalize()))
    }
}

impl SettlementEngine for SettlementLedger {
    fn settle(
        &self,
        request: &SettlementRequest,
        settled_at: Timestamp,
    ) -> Result<SettlementReceipt, AdapterError> {
        // Ensure both wallets exist before moving funds.
        let from_balance = self.balance(&request.from_agent)?;
        self.balance(&request.to_agent)?;
        let tx_signature = self.next_signature(request)?;

        let receipt = if from_balance < request.amount_usdc {
            SettlementReceipt {
                tx_signature,
                from_agent: request.from_agent.clone(),
                to_agent: request.to_agent.clone(),
                amount_usdc: request.amount_usdc,
                network: self.network.clone(),
                status: SettlementStatus::Failed,
                timestamp: settled_at,
                memo: "Insufficient balance".to_string(),
                block_hash: None,
            }
        } else {
            let mut balances = self
                .balances
                .lock()
                .map_err(|_| AdapterError::Failed("balance table poisoned".to_string()))?;
            if let Some(balance) = balances.get_mut(&request.from_agent) {
                *balance -= request.amount_usdc;
            }
            if let Some(balance) = balances.get_mut(&request.to_agent) {
                *balance += request.amount_usdc;
            }
            drop(balances);

            let mut hasher = Sha256::new();
            hasher.update(b"block:");
            hasher.update(tx_signature.as_bytes());
            SettlementReceipt {
                tx_signature,
                from_agent: request.from_agent.clone(),
                to_agent: request.to_agent.clone(),
                amount_usdc: request.amount_usdc,
                network: self.network.clone(),
                status: SettlementStatus::Confirmed,
                timestamp: settled_at,
                memo: if request.memo.is_empty() {
                    format!("A2A service fee: {} -> {}", request.from_agent, request.to_agent)
                } else {
                    request.memo.clone()
                },
                block_hash: Some(hex_encode(&hasher.finalize())),
            }
        };

        self.ledger
            .lock()
            .map_err(|_| AdapterError::Failed("ledger poisoned".to_string()))?
            .push(receipt.clone());
        Ok(receipt)
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    /// Lowercase hex alphabet used for signature rendering.
    const ALPHABET: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(ALPHABET[usize::from(byte >> 4)]));
        out.push(char::from(ALPHABET[usize::from(byte & 0x0f)]));
    }
    out
}
