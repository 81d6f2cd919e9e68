// crates/verdant-adapters/src/telemetry.rs
// ============================================================================
// Module: Verdant Telemetry Simulator
// Description: Simulated building telemetry with injectable anomaly spikes.
// Purpose: Provide deterministic energy and water streams for demos and tests.
// Dependencies: rand, sha2, verdant-core
// ============================================================================

//! ## Overview
//! The simulator synthesizes hourly readings from sinusoidal day/night
//! baselines plus seeded Gaussian noise. Injected anomaly spikes land in the
//! last three hours of the next scan for the targeted building and are
//! consumed on read. All randomness derives from the configured seed, so
//! identical scans produce identical reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::Digest;
use sha2::Sha256;
use verdant_core::AdapterError;
use verdant_core::BuildingId;
use verdant_core::ResourceKind;
use verdant_core::TelemetryProvider;
use verdant_core::TelemetryReading;
use verdant_core::TelemetryReport;
use verdant_core::TelemetrySummary;
use verdant_core::Timestamp;

// ============================================================================
// SECTION: Simulator
// ============================================================================

/// Anomaly score above which a reading counts toward `anomaly_count`.
const SCORE_THRESHOLD: f64 = 0.3;

/// Seeded telemetry simulator with injectable spikes.
#[derive(Debug)]
pub struct TelemetrySimulator {
    /// Base seed all per-scan RNG streams derive from.
    seed: u64,
    /// Pending injected severities keyed by injection key.
    injected: Mutex<HashMap<String, f64>>,
}

impl Default for TelemetrySimulator {
    fn default() -> Self {
        Self::with_seed(7)
    }
}

impl TelemetrySimulator {
    /// Creates a simulator with the given base seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            injected: Mutex::new(HashMap::new()),
        }
    }

    /// Queues an anomaly spike for the next scan of a building.
    ///
    /// Severity is clamped to `[0, 1]`; the water stream receives 80% of the
    /// energy severity.
    pub fn inject(&self, building_id: &BuildingId, severity: f64) {
        let clamped = severity.clamp(0.0, 1.0);
        if let Ok(mut injected) = self.injected.lock() {
            injected.insert(building_id.to_string(), clamped);
            injected.insert(format!("{building_id}:water"), clamped * 0.8);
        }
    }

    /// Consumes any pending injection for an injection key.
    fn take_injection(&self, key: &str) -> f64 {
        self.injected.lock().map_or(0.0, |mut injected| injected.remove(key).unwrap_or(0.0))
    }

    /// Builds the per-scan RNG for a building and resource.
    fn rng(&self, building_id: &BuildingId, resource: ResourceKind) -> StdRng {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_be_bytes());
        hasher.update(building_id.as_str().as_bytes());
        hasher.update(resource.unit().as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        StdRng::seed_from_u64(u64::from_be_bytes(bytes))
    }

    /// Synthesizes one report over the scan window.
    fn simulate(
        &self,
        building_id: &BuildingId,
        resource: ResourceKind,
        hours: u32,
        injection_key: &str,
    ) -> TelemetryReport {
        let injected_severity = self.take_injection(injection_key);
        let mut rng = self.rng(building_id, resource);

        let mut readings = Vec::with_capacity(usize::try_from(hours).unwrap_or_default());
        let mut anomaly_count = 0;
        let mut total = 0.0;

        for i in 0..hours {
            let hour_of_day = i % 24;
            let baseline = baseline_for(resource, hour_of_day, &mut rng);
            let noise = gauss(&mut rng, noise_std(resource));
            let mut value = (baseline + noise).max(0.0);

            let mut anomaly_score = 0.0;
            if injected_severity > 0.0 && i + 3 >= hours {
                let (spread, base_score, scale) = spike_profile(resource);
                let spike = baseline * injected_severity * rng.gen_range(spread.0..spread.1);
                value += spike;
                anomaly_score = (base_score + injected_severity * scale).min(1.0);
            } else if value > baseline * spike_trigger(resource) {
                anomaly_score = ((value - baseline) / baseline).min(1.0);
            }

            if anomaly_score > SCORE_THRESHOLD {
                anomaly_count += 1;
            }

            total += value;
            readings.push(TelemetryReading {
                timestamp: Timestamp::new(format!("2026-01-01T{hour_of_day:02}:00:00Z")),
                value: round2(value),
                anomaly_score: round3(anomaly_score),
            });
        }

        let avg = total / f64::from(hours.max(1));
        let peak = readings.iter().map(|r| r.value).fold(0.0, f64::max);

        TelemetryReport {
            building_id: building_id.clone(),
            resource,
            readings,
            summary: TelemetrySummary {
                avg: round2(avg),
                peak: round2(peak),
                anomaly_count,
                total: round2(total),
                hours_sampled: hours,
            },
        }
    }
}

impl TelemetryProvider for TelemetrySimulator {
    fn energy(
        &self,
        building_id: &BuildingId,
        hours: u32,
    ) -> Result<TelemetryReport, AdapterError> {
        Ok(self.simulate(building_id, ResourceKind::Energy, hours, building_id.as_str()))
    }

    fn water(&self, building_id: &BuildingId, hours: u32) -> Result<TelemetryReport, AdapterError> {
        let key = format!("{building_id}:water");
        Ok(self.simulate(building_id, ResourceKind::Water, hours, &key))
    }
}

// ============================================================================
// SECTION: Baselines
// ============================================================================

/// Returns the sinusoidal baseline for a resource at an hour of day.
fn baseline_for(resource: ResourceKind, hour_of_day: u32, rng: &mut StdRng) -> f64 {
    let hour = f64::from(hour_of_day);
    match resource {
        // Energy peaks mid-afternoon (~180 kWh) and troughs overnight (~80 kWh).
        ResourceKind::Energy => 130.0 + 50.0 * ((hour - 3.0) * PI / 12.0).sin(),
        // Water plateaus during business hours and idles overnight.
        ResourceKind::Water => {
            if (8..=18).contains(&hour_of_day) {
                450.0 + 100.0 * ((hour - 8.0) * PI / 10.0).sin()
            } else {
                120.0 + gauss(rng, 15.0)
            }
        }
    }
}

/// Gaussian noise standard deviation per resource.
const fn noise_std(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Energy => 8.0,
        ResourceKind::Water => 20.0,
    }
}

/// Multiplier above baseline at which an organic reading scores anomalous.
const fn spike_trigger(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Energy => 1.15,
        ResourceKind::Water => 1.2,
    }
}

/// Injection spike spread and score profile per resource.
const fn spike_profile(resource: ResourceKind) -> ((f64, f64), f64, f64) {
    match resource {
        ResourceKind::Energy => ((0.8, 1.2), 0.5, 0.4),
        ResourceKind::Water => ((0.7, 1.3), 0.4, 0.5),
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Samples zero-mean Gaussian noise via the Box-Muller transform.
fn gauss(rng: &mut StdRng, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * std_dev
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to three decimal places.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
