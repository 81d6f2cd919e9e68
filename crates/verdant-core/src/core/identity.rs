// crates/verdant-core/src/core/identity.rs
// ============================================================================
// Module: Verdant Agent Identity Store
// Description: Ed25519 keypair lifecycle for per-agent signing identities.
// Purpose: Generate, persist, load, and export agent keys across restarts.
// Dependencies: base64, ed25519-dalek, rand, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Each signing agent owns one Ed25519 keypair whose private half is persisted
//! as an unencrypted PKCS#8 PEM file under the key directory, named after the
//! agent. Generation is idempotent: a second generate for the same agent
//! returns the persisted key unless overwrite is requested. The store is
//! read-heavy, so parsed keys are cached per process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use ed25519_dalek::SigningKey;
use ed25519_dalek::VerifyingKey;
use ed25519_dalek::pkcs8::DecodePrivateKey;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use pkcs8::LineEnding;
use rand::rngs::OsRng;
use thiserror::Error;

use crate::core::identifiers::AgentId;
use crate::core::identifiers::SIGNING_AGENTS;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the identity store.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No private key file exists for the agent.
    #[error("no private key found for agent '{agent}' at {path}")]
    NotFound {
        /// Agent whose key is missing.
        agent: AgentId,
        /// Path that was probed.
        path: String,
    },
    /// The key file exists but is not a usable Ed25519 PKCS#8 document.
    #[error("key file for agent '{agent}' is not an ed25519 pkcs#8 key: {detail}")]
    WrongAlgorithm {
        /// Agent whose key failed to parse.
        agent: AgentId,
        /// Parser failure detail.
        detail: String,
    },
    /// Key serialization to PKCS#8 PEM failed.
    #[error("failed to encode key for agent '{agent}': {detail}")]
    Encoding {
        /// Agent whose key failed to encode.
        agent: AgentId,
        /// Encoder failure detail.
        detail: String,
    },
    /// Filesystem operation failed.
    #[error("identity store io error: {0}")]
    Io(String),
    /// Store cache mutex was poisoned.
    #[error("identity store cache poisoned")]
    CachePoisoned,
}

// ============================================================================
// SECTION: Identity Store
// ============================================================================

/// Directory-backed store of per-agent Ed25519 signing keys.
///
/// # Invariants
/// - One `<agent>.pem` file per signing agent under the key directory.
/// - Under concurrent generation for the same agent, the first writer wins and
///   later callers observe the persisted key.
#[derive(Debug)]
pub struct IdentityStore {
    /// Directory containing per-agent key files.
    keys_dir: PathBuf,
    /// Process-wide cache of parsed signing keys.
    cache: Mutex<BTreeMap<AgentId, SigningKey>>,
}

impl IdentityStore {
    /// Creates a store rooted at the provided key directory.
    #[must_use]
    pub fn new(keys_dir: impl Into<PathBuf>) -> Self {
        Self {
            keys_dir: keys_dir.into(),
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the key file path for an agent.
    #[must_use]
    pub fn key_path(&self, agent: AgentId) -> PathBuf {
        self.keys_dir.join(format!("{}.pem", agent.as_str()))
    }

    /// Ensures every signing agent has a persisted keypair.
    ///
    /// Safe to call at every process start.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when generation or persistence fails.
    pub fn ensure_all(&self) -> Result<(), IdentityError> {
        for agent in SIGNING_AGENTS {
            self.generate(agent, false)?;
        }
        Ok(())
    }

    /// Generates and persists a keypair for an agent.
    ///
    /// When the key file already exists and `overwrite` is false, the existing
    /// key is loaded instead.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when persistence or parsing fails.
    pub fn generate(&self, agent: AgentId, overwrite: bool) -> Result<SigningKey, IdentityError> {
        let path = self.key_path(agent);
        if path.exists() && !overwrite {
            return self.signing_key(agent);
        }

        let key = SigningKey::generate(&mut OsRng);
        let pem = key.to_pkcs8_pem(LineEnding::LF).map_err(|err| IdentityError::Encoding {
            agent,
            detail: err.to_string(),
        })?;
        fs::create_dir_all(&self.keys_dir).map_err(|err| IdentityError::Io(err.to_string()))?;
        write_if_absent(&path, pem.as_bytes(), overwrite)
            .map_err(|err| IdentityError::Io(err.to_string()))?;

        // Another writer may have won the race; the persisted key is canonical.
        let persisted = self.load_from_disk(agent)?;
        self.cache_insert(agent, persisted.clone())?;
        Ok(persisted)
    }

    /// Returns the signing key for an agent.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NotFound`] when no key file exists and
    /// [`IdentityError::WrongAlgorithm`] when the file is not an Ed25519 key.
    pub fn signing_key(&self, agent: AgentId) -> Result<SigningKey, IdentityError> {
        if let Some(key) = self.cache_get(agent)? {
            return Ok(key);
        }
        let key = self.load_from_disk(agent)?;
        self.cache_insert(agent, key.clone())?;
        Ok(key)
    }

    /// Derives the verifying key for an agent from the stored private key.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the private key cannot be loaded.
    pub fn verifying_key(&self, agent: AgentId) -> Result<VerifyingKey, IdentityError> {
        Ok(self.signing_key(agent)?.verifying_key())
    }

    /// Exports the agent public key as base64 of the 32 raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the private key cannot be loaded.
    pub fn public_key_b64(&self, agent: AgentId) -> Result<String, IdentityError> {
        let key = self.verifying_key(agent)?;
        Ok(Base64.encode(key.to_bytes()))
    }

    /// Loads and parses an agent key file from disk.
    fn load_from_disk(&self, agent: AgentId) -> Result<SigningKey, IdentityError> {
        let path = self.key_path(agent);
        if !path.exists() {
            return Err(IdentityError::NotFound {
                agent,
                path: path.display().to_string(),
            });
        }
        let pem =
            fs::read_to_string(&path).map_err(|err| IdentityError::Io(err.to_string()))?;
        SigningKey::from_pkcs8_pem(&pem).map_err(|err| IdentityError::WrongAlgorithm {
            agent,
            detail: err.to_string(),
        })
    }

    /// Reads a cached signing key.
    fn cache_get(&self, agent: AgentId) -> Result<Option<SigningKey>, IdentityError> {
        let guard = self.cache.lock().map_err(|_| IdentityError::CachePoisoned)?;
        Ok(guard.get(&agent).cloned())
    }

    /// Inserts a signing key into the cache.
    fn cache_insert(&self, agent: AgentId, key: SigningKey) -> Result<(), IdentityError> {
        let mut guard = self.cache.lock().map_err(|_| IdentityError::CachePoisoned)?;
        guard.insert(agent, key);
        Ok(())
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Writes a key file, preserving an existing file unless overwriting.
fn write_if_absent(path: &Path, bytes: &[u8], overwrite: bool) -> std::io::Result<()> {
    if !overwrite && path.exists() {
        return Ok(());
    }
    fs::write(path, bytes)
}
