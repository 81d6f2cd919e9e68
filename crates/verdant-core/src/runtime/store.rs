// crates/verdant-core/src/runtime/store.rs
// ============================================================================
// Module: Verdant In-Memory Checkpoint Store
// Description: Simple in-memory checkpoint store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`CheckpointStore`] for tests and local demos. It is not intended for
//! production use; durable hosts should use a disk-backed store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::CheckpointRecord;
use crate::core::ThreadId;
use crate::interfaces::CheckpointStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory checkpoint store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCheckpointStore {
    /// Per-thread checkpoint histories protected by a mutex.
    threads: Arc<Mutex<BTreeMap<ThreadId, Vec<CheckpointRecord>>>>,
}

impl InMemoryCheckpointStore {
    /// Creates a new in-memory checkpoint store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threads: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn append(&self, thread_id: &ThreadId, record: &CheckpointRecord) -> Result<(), StoreError> {
        self.threads
            .lock()
            .map_err(|_| StoreError::Store("checkpoint store mutex poisoned".to_string()))?
            .entry(thread_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn latest(&self, thread_id: &ThreadId) -> Result<Option<CheckpointRecord>, StoreError> {
        let guard = self
            .threads
            .lock()
            .map_err(|_| StoreError::Store("checkpoint store mutex poisoned".to_string()))?;
        Ok(guard.get(thread_id).and_then(|records| records.last().cloned()))
    }

    fn history(&self, thread_id: &ThreadId) -> Result<Vec<CheckpointRecord>, StoreError> {
        let guard = self
            .threads
            .lock()
            .map_err(|_| StoreError::Store("checkpoint store mutex poisoned".to_string()))?;
        Ok(guard.get(thread_id).cloned().unwrap_or_default())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared checkpoint store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedCheckpointStore {
    /// Inner store implementation.
    inner: Arc<dyn CheckpointStore + Send + Sync>,
}

impl SharedCheckpointStore {
    /// Wraps a checkpoint store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl CheckpointStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn CheckpointStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl CheckpointStore for SharedCheckpointStore {
    fn append(&self, thread_id: &ThreadId, record: &CheckpointRecord) -> Result<(), StoreError> {
        self.inner.append(thread_id, record)
    }

    fn latest(&self, thread_id: &ThreadId) -> Result<Option<CheckpointRecord>, StoreError> {
        self.inner.latest(thread_id)
    }

    fn history(&self, thread_id: &ThreadId) -> Result<Vec<CheckpointRecord>, StoreError> {
        self.inner.history(thread_id)
    }
}
