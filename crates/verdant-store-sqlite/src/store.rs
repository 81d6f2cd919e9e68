// crates/verdant-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Checkpoint Store
// Description: Durable CheckpointStore backed by SQLite WAL.
// Purpose: Persist checkpoint histories with deterministic serialization.
// Dependencies: rusqlite, serde_json, verdant-core
// ============================================================================

//! ## Overview
//! Each checkpoint append writes one JSON row keyed by `(thread_id,
//! step_index)` into an append-only table. Loads fail closed: rows that do
//! not deserialize surface as store errors rather than silently resetting a
//! thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use thiserror::Error;
use verdant_core::CheckpointRecord;
use verdant_core::CheckpointStore;
use verdant_core::StoreError;
use verdant_core::ThreadId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store construction errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Database open or pragma failure.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Schema initialization failure.
    #[error("sqlite store schema error: {0}")]
    Schema(String),
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Durable checkpoint store over a `SQLite` database file.
#[derive(Debug)]
pub struct SqliteCheckpointStore {
    /// Database connection protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteCheckpointStore {
    /// Opens (or creates) the store at a database path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or the
    /// schema cannot be initialized.
    pub fn open(path: &Path) -> Result<Self, SqliteStoreError> {
        let conn =
            Connection::open(path).map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Self::initialize(conn)
    }

    /// Opens an in-memory store, useful for tests.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when initialization fails.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        let conn =
            Connection::open_in_memory().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Self::initialize(conn)
    }

    /// Applies pragmas and the schema to a fresh connection.
    fn initialize(conn: Connection) -> Result<Self, SqliteStoreError> {
        conn.busy_timeout(std::time::Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        conn.pragma_update(None, "journal_mode", "wal")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        conn.pragma_update(None, "synchronous", "full")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);
             CREATE TABLE IF NOT EXISTS checkpoints (
                 thread_id TEXT NOT NULL,
                 step_index INTEGER NOT NULL,
                 seq INTEGER PRIMARY KEY AUTOINCREMENT,
                 record_json TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_checkpoints_thread
                 ON checkpoints (thread_id, seq);",
        )
        .map_err(|err| SqliteStoreError::Schema(err.to_string()))?;

        let existing: Option<i64> = conn
            .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
            .optional()
            .map_err(|err| SqliteStoreError::Schema(err.to_string()))?;
        match existing {
            None => {
                conn.execute(
                    "INSERT INTO store_meta (version) VALUES (?1)",
                    params![SCHEMA_VERSION],
                )
                .map_err(|err| SqliteStoreError::Schema(err.to_string()))?;
            }
            Some(version) if version == SCHEMA_VERSION => {}
            Some(version) => {
                return Err(SqliteStoreError::Schema(format!(
                    "unsupported schema version {version}, expected {SCHEMA_VERSION}"
                )));
            }
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl CheckpointStore for SqliteCheckpointStore {
    fn append(&self, thread_id: &ThreadId, record: &CheckpointRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Store("sqlite connection poisoned".to_string()))?;
        conn.execute(
            "INSERT INTO checkpoints (thread_id, step_index, record_json) VALUES (?1, ?2, ?3)",
            params![thread_id.as_str(), i64::from(record.step_index), json],
        )
        .map_err(|err| StoreError::Io(err.to_string()))?;
        Ok(())
    }

    fn latest(&self, thread_id: &ThreadId) -> Result<Option<CheckpointRecord>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Store("sqlite connection poisoned".to_string()))?;
        let row: Option<String> = conn
            .query_row(
                "SELECT record_json FROM checkpoints WHERE thread_id = ?1 ORDER BY seq DESC \
                 LIMIT 1",
                params![thread_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Io(err.to_string()))?;
        drop(conn);

        row.map(|json| {
            serde_json::from_str(&json).map_err(|err| StoreError::Serialization(err.to_string()))
        })
        .transpose()
    }

    fn history(&self, thread_id: &ThreadId) -> Result<Vec<CheckpointRecord>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Store("sqlite connection poisoned".to_string()))?;
        let mut statement = conn
            .prepare(
                "SELECT record_json FROM checkpoints WHERE thread_id = ?1 ORDER BY seq ASC",
            )
            .map_err(|err| StoreError::Io(err.to_string()))?;
        let rows = statement
            .query_map(params![thread_id.as_str()], |row| row.get::<_, String>(0))
            .map_err(|err| StoreError::Io(err.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            let json = row.map_err(|err| StoreError::Io(err.to_string()))?;
            records.push(
                serde_json::from_str(&json)
                    .map_err(|err| StoreError::Serialization(err.to_string()))?,
            );
        }
        Ok(records)
    }
}
