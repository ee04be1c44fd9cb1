//! Store implementation
//!
//! HashMap-based mapping and transaction slot behind a single RwLock.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;

use crate::error::{Result, SlateError};
use crate::persistence;

use super::{Record, RollbackOutcome, TransactionBuffer};

/// State guarded by the store lock
#[derive(Debug, Default)]
struct StoreState {
    /// Committed records
    entries: HashMap<String, Record>,

    /// The one process-wide transaction slot
    pending: Option<TransactionBuffer>,
}

/// The key/value store
///
/// ## Concurrency Model
///
/// - **Reads** (get and accessors): shared read lock, concurrent with each other
/// - **Mutations** (put/delete/begin/commit/rollback): exclusive write lock
/// - **Snapshots** (load_data/persist): exclusive write lock held across the
///   file I/O so no mutation interleaves with a load or persist
///
/// There is exactly one transaction slot and it carries no caller identity:
/// any caller may stage into, commit, or roll back the active transaction.
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Create a store pre-populated with committed records
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.key.clone(), record))
            .collect();

        Self {
            state: RwLock::new(StoreState {
                entries,
                pending: None,
            }),
        }
    }

    // =========================================================================
    // Key Operations
    // =========================================================================

    /// Get the committed value for a key
    ///
    /// Staged writes of an open transaction are not visible here.
    pub fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read();
        state.entries.get(key).map(|record| record.value.clone())
    }

    /// Stage an upsert in the active transaction
    ///
    /// The mapping is untouched until commit. Concurrent callers staging the
    /// same key overwrite each other.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.write();

        let pending = state
            .pending
            .as_mut()
            .ok_or(SlateError::NoActiveTransaction)?;

        pending.stage(key, value);
        tracing::trace!(key, transaction = pending.id(), "staged put");

        Ok(())
    }

    /// Remove a key from the mapping immediately
    ///
    /// Deletes bypass the transaction buffer, so a later rollback does not
    /// bring the key back. Absent keys are a no-op.
    pub fn delete(&self, key: &str) {
        let mut state = self.state.write();

        if state.entries.remove(key).is_some() {
            tracing::debug!(key, "deleted key");
        }
    }

    // =========================================================================
    // Transaction Lifecycle
    // =========================================================================

    /// Open the transaction slot
    pub fn begin_transaction(&self) -> Result<()> {
        let mut state = self.state.write();

        if state.pending.is_some() {
            return Err(SlateError::TransactionAlreadyActive);
        }

        let buffer = TransactionBuffer::new();
        tracing::debug!(transaction = buffer.id(), "transaction started");
        state.pending = Some(buffer);

        Ok(())
    }

    /// Apply every staged upsert to the mapping and clear the slot
    ///
    /// Returns the number of records applied.
    pub fn commit_transaction(&self) -> Result<usize> {
        let mut state = self.state.write();

        let pending = state.pending.take().ok_or(SlateError::NoActiveTransaction)?;
        let id = pending.id().to_string();
        let operations = pending.into_operations();
        let applied = operations.len();

        state.entries.extend(operations);

        tracing::debug!(transaction = %id, applied, "transaction committed");
        Ok(applied)
    }

    /// Discard the active transaction without touching the mapping
    pub fn rollback_transaction(&self) -> RollbackOutcome {
        let mut state = self.state.write();

        match state.pending.take() {
            Some(pending) => {
                let outcome = RollbackOutcome::RolledBack {
                    id: pending.id().to_string(),
                    discarded: pending.len(),
                };
                tracing::debug!(transaction = pending.id(), discarded = pending.len(), "transaction rolled back");
                outcome
            }
            None => {
                tracing::warn!("rollback requested with no active transaction");
                RollbackOutcome::NoActiveTransaction
            }
        }
    }

    // =========================================================================
    // Snapshot Operations
    // =========================================================================

    /// Replace the mapping with the contents of a JSON snapshot
    ///
    /// A missing file is not an error and leaves the mapping unchanged. The
    /// transaction slot is not affected.
    pub fn load_data(&self, path: &Path) -> Result<()> {
        let mut state = self.state.write();

        match persistence::read_snapshot(path)? {
            Some(entries) => {
                tracing::info!(path = %path.display(), records = entries.len(), "loaded snapshot");
                state.entries = entries;
            }
            None => {
                tracing::info!(path = %path.display(), "no snapshot found, keeping current state");
            }
        }

        Ok(())
    }

    /// Write the committed mapping to a JSON snapshot
    ///
    /// Staged writes are not included. Failures leave in-memory state as is.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let state = self.state.write();

        persistence::write_snapshot(path, &state.entries)?;
        tracing::info!(path = %path.display(), records = state.entries.len(), "persisted snapshot");

        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of committed records
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Check for a committed key
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().entries.contains_key(key)
    }

    /// Identifier of the active transaction, if any
    pub fn active_transaction_id(&self) -> Option<String> {
        self.state
            .read()
            .pending
            .as_ref()
            .map(|pending| pending.id().to_string())
    }

    /// Number of upserts staged in the active transaction (0 when idle)
    pub fn pending_len(&self) -> usize {
        self.state
            .read()
            .pending
            .as_ref()
            .map_or(0, TransactionBuffer::len)
    }

    /// Copy of the committed mapping as key → value
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.state
            .read()
            .entries
            .iter()
            .map(|(key, record)| (key.clone(), record.value.clone()))
            .collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
