// crates/verdant-core/src/core/citation.rs
// ============================================================================
// Module: Verdant Cite-Before-Act Middleware
// Description: Data-source citations with tamper-evident content hashes.
// Purpose: Prove that agents consulted verifiable data before proposing actions.
// Dependencies: serde, crate::core::{hashing, identifiers, time}
// ============================================================================

//! ## Overview
//! A citation records that an agent read a data source before acting on it.
//! Structured payloads are hashed over their canonical JSON form and raw text
//! over UTF-8 bytes, so any downstream consumer can re-derive the hash from
//! the same data and detect tampering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::is_hex_digest;
use crate::core::hashing::sha256_hex;
use crate::core::identifiers::SourceId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of the human-readable snippet carried on a citation.
pub const SNIPPET_MAX_LEN: usize = 200;

// ============================================================================
// SECTION: Citation Block
// ============================================================================

/// Immutable proof that a data source was consulted before acting.
///
/// # Invariants
/// - `data_hash` is 64 lowercase hex chars of a SHA-256 digest.
/// - `snippet` is at most [`SNIPPET_MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBlock {
    /// Logical name of the cited source.
    pub source_id: SourceId,
    /// SHA-256 hex digest of the cited payload.
    pub data_hash: String,
    /// Citation timestamp.
    pub timestamp: Timestamp,
    /// Optional human-readable excerpt for audit display.
    pub snippet: String,
}

// ============================================================================
// SECTION: Citation Payloads
// ============================================================================

/// Payload forms accepted by the citation middleware.
#[derive(Debug, Clone, Copy)]
pub enum CitationSource<'a> {
    /// Structured payload hashed over its canonical JSON form.
    Json(&'a Value),
    /// Raw text hashed over UTF-8 bytes.
    Text(&'a str),
}

impl CitationSource<'_> {
    /// Computes the SHA-256 hex digest of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization of a JSON payload fails.
    fn digest(&self) -> Result<String, HashError> {
        match self {
            Self::Json(value) => {
                let bytes = canonical_json_bytes(value)?;
                Ok(sha256_hex(&bytes))
            }
            Self::Text(text) => Ok(sha256_hex(text.as_bytes())),
        }
    }
}

// ============================================================================
// SECTION: Middleware Operations
// ============================================================================

/// Hashes a data source and returns a [`CitationBlock`].
///
/// Identical inputs produce identical `data_hash` values across processes.
/// The snippet is truncated to [`SNIPPET_MAX_LEN`] characters.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization of a JSON payload fails.
pub fn cite(
    source_id: SourceId,
    data: &CitationSource<'_>,
    snippet: &str,
    timestamp: Timestamp,
) -> Result<CitationBlock, HashError> {
    Ok(CitationBlock {
        source_id,
        data_hash: data.digest()?,
        timestamp,
        snippet: truncate_snippet(snippet),
    })
}

/// Returns true when the citation list is non-empty and every hash is a
/// well-formed SHA-256 hex digest.
#[must_use]
pub fn citations_present(citations: &[CitationBlock]) -> bool {
    !citations.is_empty() && citations.iter().all(|c| is_hex_digest(&c.data_hash))
}

/// Re-hashes the payload and compares it against the stored citation hash.
#[must_use]
pub fn citation_matches(citation: &CitationBlock, data: &CitationSource<'_>) -> bool {
    data.digest().is_ok_and(|digest| digest == citation.data_hash)
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Truncates a snippet to the maximum citation excerpt length.
fn truncate_snippet(snippet: &str) -> String {
    snippet.chars().take(SNIPPET_MAX_LEN).collect()
}
