// crates/verdant-core/src/core/time.rs
// ============================================================================
// Module: Verdant Time Model
// Description: Canonical timestamp representation for traces, events, and logs.
// Purpose: Provide deterministic, replayable time values across Verdant records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Verdant embeds explicit RFC 3339 timestamps in traces and events to keep
//! replay deterministic. The runtime never reads wall-clock time directly;
//! hosts supply time through the [`crate::interfaces::Clock`] interface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Canonical RFC 3339 timestamp used in Verdant records.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - No validation is performed; formatting is a clock-implementation responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Creates a timestamp from a preformatted RFC 3339 string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
