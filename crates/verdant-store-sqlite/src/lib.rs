// crates/verdant-store-sqlite/src/lib.rs
// ============================================================================
// Module: Verdant SQLite Store Library
// Description: Durable checkpoint store backed by SQLite WAL.
// Purpose: Persist per-thread checkpoint histories across process restarts.
// Dependencies: rusqlite, serde_json, verdant-core
// ============================================================================

//! ## Overview
//! This crate implements a durable [`verdant_core::CheckpointStore`] over
//! `SQLite`. Checkpoints append one JSON row per `(thread_id, step_index)`,
//! so a thread suspended at the governor in one process resumes in another
//! with the identical dispatch sequence.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteCheckpointStore;
pub use store::SqliteStoreError;
