//! Error types for SlateKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SlateError
pub type Result<T> = std::result::Result<T, SlateError>;

/// Unified error type for SlateKV operations
#[derive(Debug, Error)]
pub enum SlateError {
    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("no active transaction")]
    NoActiveTransaction,

    #[error("transaction already in progress")]
    TransactionAlreadyActive,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Snapshot encode error: {0}")]
    Encode(#[source] serde_json::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server error: {0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SlateError {
    /// True for errors raised by the transaction state machine
    pub fn is_transaction_error(&self) -> bool {
        matches!(
            self,
            SlateError::NoActiveTransaction | SlateError::TransactionAlreadyActive
        )
    }
}
