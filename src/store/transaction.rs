//! Transaction buffer
//!
//! Staging area for upserts that have not been applied to the mapping yet.

use std::collections::HashMap;

use uuid::Uuid;

use super::Record;

/// Pending upserts of the single active transaction
///
/// Only upserts are staged. Deletes go straight to the mapping.
#[derive(Debug, Clone)]
pub struct TransactionBuffer {
    /// Opaque identifier generated at begin time
    id: String,

    /// Staged upserts keyed by record key (last staged write wins)
    operations: HashMap<String, Record>,
}

impl TransactionBuffer {
    /// Create an empty buffer with a fresh UUID v4 identifier
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            operations: HashMap::new(),
        }
    }

    /// Transaction identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stage an upsert, replacing any earlier staged value for the key
    pub fn stage(&mut self, key: &str, value: &str) {
        self.operations
            .insert(key.to_string(), Record::new(key, value));
    }

    /// Look up a staged record
    pub fn staged(&self, key: &str) -> Option<&Record> {
        self.operations.get(key)
    }

    /// Number of staged upserts
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Consume the buffer, yielding the staged upserts
    pub fn into_operations(self) -> HashMap<String, Record> {
        self.operations
    }
}

impl Default for TransactionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a rollback request
///
/// Rolling back with no open transaction is a notice, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The active transaction was discarded
    RolledBack {
        id: String,
        discarded: usize,
    },

    /// There was nothing to roll back
    NoActiveTransaction,
}

impl RollbackOutcome {
    /// Human-readable notice for transport responses
    pub fn message(&self) -> &'static str {
        match self {
            RollbackOutcome::RolledBack { .. } => "transaction rolled back",
            RollbackOutcome::NoActiveTransaction => "no active transaction",
        }
    }
}
