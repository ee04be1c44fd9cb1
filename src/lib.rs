//! # SlateKV
//!
//! An in-memory key-value store with:
//! - A single process-wide transaction slot (begin / put / commit or rollback)
//! - Immediate deletes that bypass the transaction buffer
//! - Caller-triggered JSON snapshots (load at startup, persist on demand)
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │               (one thread per connection)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │        (RwLock: shared reads, exclusive mutations)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Entries   │          │ Transaction │
//!   │ (committed) │          │   Buffer    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │  Snapshot   │
//!   │   (JSON)    │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use slatekv::Store;
//!
//! let store = Store::new();
//! store.begin_transaction().unwrap();
//! store.put("a", "1").unwrap();
//! assert_eq!(store.get("a"), None);
//! store.commit_transaction().unwrap();
//! assert_eq!(store.get("a"), Some("1".to_string()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod persistence;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SlateError, Result};
pub use config::Config;
pub use store::{Record, RollbackOutcome, Store, TransactionBuffer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlateKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
