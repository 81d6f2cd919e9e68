// crates/verdant-core/tests/citation.rs
// ============================================================================
// Module: Citation Middleware Tests
// Description: Tests for Cite-Before-Act citation creation and verification.
// ============================================================================
//! ## Overview
//! Validates citation hashing determinism, presence checks, and hash
//! re-derivation against original and altered payloads.

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

use serde_json::json;
use verdant_core::CitationSource;
use verdant_core::SNIPPET_MAX_LEN;
use verdant_core::SourceId;
use verdant_core::Timestamp;
use verdant_core::citation_matches;
use verdant_core::citations_present;
use verdant_core::cite;

/// Fixed timestamp used across citation tests.
fn ts() -> Timestamp {
    Timestamp::new("2026-01-01T00:00:00Z")
}

// ============================================================================
// SECTION: Citation Creation
// ============================================================================

/// Tests identical structured payloads produce identical hashes.
#[test]
fn test_cite_json_is_deterministic() {
    let data = json!({"summary": {"avg": 130.0, "peak": 180.0}});
    let a = cite(SourceId::new("bms:energy:HQ-01"), &CitationSource::Json(&data), "", ts())
        .unwrap();
    let b = cite(SourceId::new("bms:energy:HQ-01"), &CitationSource::Json(&data), "", ts())
        .unwrap();
    assert_eq!(a.data_hash, b.data_hash);
    assert_eq!(a.data_hash.len(), 64);
}

/// Tests string payloads hash over UTF-8 bytes.
#[test]
fn test_cite_text() {
    let a = cite(SourceId::new("doc:1"), &CitationSource::Text("hello"), "", ts()).unwrap();
    let b = cite(SourceId::new("doc:1"), &CitationSource::Text("hello"), "", ts()).unwrap();
    let c = cite(SourceId::new("doc:1"), &CitationSource::Text("hell0"), "", ts()).unwrap();
    assert_eq!(a.data_hash, b.data_hash);
    assert_ne!(a.data_hash, c.data_hash);
}

/// Tests snippets are truncated to the citation excerpt limit.
#[test]
fn test_snippet_truncation() {
    let long = "x".repeat(SNIPPET_MAX_LEN + 50);
    let block =
        cite(SourceId::new("doc:2"), &CitationSource::Text("data"), &long, ts()).unwrap();
    assert_eq!(block.snippet.len(), SNIPPET_MAX_LEN);
}

// ============================================================================
// SECTION: Presence and Matching
// ============================================================================

/// Tests presence verification over valid, empty, and malformed lists.
#[test]
fn test_citations_present() {
    let data = json!([1, 2, 3]);
    let mut block =
        cite(SourceId::new("s"), &CitationSource::Json(&data), "", ts()).unwrap();

    assert!(citations_present(std::slice::from_ref(&block)));
    assert!(!citations_present(&[]));

    block.data_hash = "short".to_string();
    assert!(!citations_present(&[block]));
}

/// Tests hash re-derivation against the original and altered payloads.
#[test]
fn test_citation_matches() {
    let data = json!({"reading": 42});
    let block = cite(SourceId::new("s"), &CitationSource::Json(&data), "", ts()).unwrap();

    assert!(citation_matches(&block, &CitationSource::Json(&data)));

    let altered = json!({"reading": 43});
    assert!(!citation_matches(&block, &CitationSource::Json(&altered)));
}
