// system-tests/tests/common/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared orchestrator harnesses and telemetry stubs.
// ============================================================================
//! ## Overview
//! Builds orchestrators over temporary key directories with either the seeded
//! simulator or deterministic flat telemetry stubs.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Shared helpers are not all used by every test binary."
)]

use std::sync::Arc;

use tempfile::TempDir;
use verdant_adapters::TelemetrySimulator;
use verdant_adapters::simulated_adapters;
use verdant_core::AdapterError;
use verdant_core::AdapterSet;
use verdant_core::BuildingId;
use verdant_core::Clock;
use verdant_core::ExecutionState;
use verdant_core::FixedClock;
use verdant_core::IdentityStore;
use verdant_core::InMemoryCheckpointStore;
use verdant_core::Orchestrator;
use verdant_core::ResourceKind;
use verdant_core::RuntimeConfig;
use verdant_core::TelemetryProvider;
use verdant_core::TelemetryReading;
use verdant_core::TelemetryReport;
use verdant_core::TelemetrySummary;
use verdant_core::Timestamp;

/// Orchestrator harness over an in-memory checkpoint store.
pub struct Harness {
    /// The orchestrator under test.
    pub orchestrator: Arc<Orchestrator<InMemoryCheckpointStore>>,
    /// Handle onto the shared checkpoint store.
    pub store: InMemoryCheckpointStore,
    /// Handle onto the telemetry simulator for anomaly injection.
    pub simulator: Arc<TelemetrySimulator>,
    /// Temporary key directory kept alive for the harness lifetime.
    pub keys: TempDir,
}

/// Returns the pinned clock shared by the suites.
pub fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock::new("2026-01-01T12:00:00Z"))
}

/// Builds a harness over the seeded telemetry simulator.
pub fn harness() -> Harness {
    harness_with_config(RuntimeConfig::default())
}

/// Builds a simulator harness with a custom runtime configuration.
pub fn harness_with_config(config: RuntimeConfig) -> Harness {
    let keys = tempfile::tempdir().unwrap();
    let (adapters, simulator) = simulated_adapters(42);
    let store = InMemoryCheckpointStore::new();
    let orchestrator = Orchestrator::new(
        store.clone(),
        Arc::new(IdentityStore::new(keys.path())),
        adapters,
        fixed_clock(),
        config,
    )
    .unwrap();
    Harness {
        orchestrator: Arc::new(orchestrator),
        store,
        simulator,
        keys,
    }
}

/// Builds a harness whose telemetry is the flat no-anomaly stub.
pub fn flat_harness() -> Harness {
    let keys = tempfile::tempdir().unwrap();
    let (mut adapters, simulator) = simulated_adapters(42);
    adapters.telemetry = Arc::new(FlatTelemetry);
    let store = InMemoryCheckpointStore::new();
    let orchestrator = Orchestrator::new(
        store.clone(),
        Arc::new(IdentityStore::new(keys.path())),
        adapters,
        fixed_clock(),
        RuntimeConfig::default(),
    )
    .unwrap();
    Harness {
        orchestrator: Arc::new(orchestrator),
        store,
        simulator,
        keys,
    }
}

/// Builds an adapter set with a custom telemetry provider.
pub fn adapters_with_telemetry(
    telemetry: Arc<dyn TelemetryProvider + Send + Sync>,
) -> AdapterSet {
    let (mut adapters, _simulator) = simulated_adapters(42);
    adapters.telemetry = telemetry;
    adapters
}

/// Returns the default initial state for starting threads.
pub fn initial_state() -> ExecutionState {
    ExecutionState::default()
}

// ============================================================================
// SECTION: Telemetry Stubs
// ============================================================================

/// Telemetry stub with flat readings and no anomalies.
pub struct FlatTelemetry;

/// Builds a flat report for a resource at a constant level.
fn flat_report(building_id: &BuildingId, resource: ResourceKind, level: f64) -> TelemetryReport {
    let readings: Vec<TelemetryReading> = (0..24)
        .map(|hour| TelemetryReading {
            timestamp: Timestamp::new(format!("2026-01-01T{hour:02}:00:00Z")),
            value: level,
            anomaly_score: 0.0,
        })
        .collect();
    TelemetryReport {
        building_id: building_id.clone(),
        resource,
        summary: TelemetrySummary {
            avg: level,
            peak: level,
            anomaly_count: 0,
            total: level * 24.0,
            hours_sampled: 24,
        },
        readings,
    }
}

impl TelemetryProvider for FlatTelemetry {
    fn energy(
        &self,
        building_id: &BuildingId,
        _hours: u32,
    ) -> Result<TelemetryReport, AdapterError> {
        Ok(flat_report(building_id, ResourceKind::Energy, 100.0))
    }

    fn water(
        &self,
        building_id: &BuildingId,
        _hours: u32,
    ) -> Result<TelemetryReport, AdapterError> {
        Ok(flat_report(building_id, ResourceKind::Water, 300.0))
    }
}

/// Telemetry stub that stalls before answering, for step-budget tests.
pub struct SlowTelemetry {
    /// Stall duration in milliseconds.
    pub delay_ms: u64,
}

impl TelemetryProvider for SlowTelemetry {
    fn energy(
        &self,
        building_id: &BuildingId,
        _hours: u32,
    ) -> Result<TelemetryReport, AdapterError> {
        std::thread::sleep(std::time::Duration::from_millis(self.delay_ms));
        Ok(flat_report(building_id, ResourceKind::Energy, 100.0))
    }

    fn water(
        &self,
        building_id: &BuildingId,
        _hours: u32,
    ) -> Result<TelemetryReport, AdapterError> {
        Ok(flat_report(building_id, ResourceKind::Water, 300.0))
    }
}
