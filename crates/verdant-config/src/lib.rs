// crates/verdant-config/src/lib.rs
// ============================================================================
// Module: Verdant Configuration
// Description: TOML-backed settings with validation for Verdant hosts.
// Purpose: Centralize key paths, limits, and feature flags in one document.
// Dependencies: serde, thiserror, toml, verdant-core
// ============================================================================

//! ## Overview
//! Hosts load one TOML settings document covering the key directory, the
//! checkpoint database path, runtime limits, and feature flags. Every field
//! has a default so an empty document is valid; validation rejects
//! out-of-band limits before the orchestrator is constructed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use verdant_core::BuildingId;
use verdant_core::RuntimeConfig;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("failed to read settings file {path}: {detail}")]
    Io {
        /// Path that was read.
        path: String,
        /// I/O failure detail.
        detail: String,
    },
    /// Settings document failed to parse.
    #[error("failed to parse settings: {0}")]
    Parse(String),
    /// A field failed validation.
    #[error("invalid setting '{field}': {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Validation failure reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Application-wide settings for Verdant hosts.
///
/// # Invariants
/// - All fields carry defaults; an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding per-agent key files.
    pub keys_dir: PathBuf,
    /// SQLite checkpoint database path.
    pub checkpoint_db: PathBuf,
    /// Building targeted by vanguard scans.
    pub building_id: String,
    /// Hard cap on total step dispatches per thread.
    pub recursion_limit: u32,
    /// Optional wall-clock budget per step in milliseconds.
    pub step_timeout_ms: Option<u64>,
    /// Seed for the telemetry simulator.
    pub telemetry_seed: u64,
    /// Base URL embedded in discovery cards.
    pub base_url: String,
    /// Whether feed enrichment is wired to a model backend.
    pub enrichment_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys_dir: PathBuf::from("./keys"),
            checkpoint_db: PathBuf::from("./verdant.db"),
            building_id: "HQ-01".to_string(),
            recursion_limit: 25,
            step_timeout_ms: None,
            telemetry_seed: 7,
            base_url: "http://localhost:8000".to_string(),
            enrichment_enabled: false,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, unparsable, or
    /// fails validation.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            detail: err.to_string(),
        })?;
        Self::load_from_str(&text)
    }

    /// Parses settings from a TOML string and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.building_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "building_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.recursion_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "recursion_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.step_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "step_timeout_ms",
                reason: "must be positive when set".to_string(),
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the orchestrator runtime configuration from these settings.
    #[must_use]
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            building_id: BuildingId::new(self.building_id.clone()),
            recursion_limit: self.recursion_limit,
            step_timeout_ms: self.step_timeout_ms,
            base_url: self.base_url.clone(),
        }
    }
}
