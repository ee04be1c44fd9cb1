//! Store Module
//!
//! The in-memory mapping and its single-slot transaction layer.
//!
//! ## Responsibilities
//! - Hold the live key → record mapping
//! - Stage upserts in one process-wide transaction buffer
//! - Apply or discard staged upserts on commit/rollback
//! - Delete keys immediately, outside any transaction
//!
//! ## State Machine
//! ```text
//!            begin                       put (staged)
//!   ┌──────┐ ─────────────▶ ┌────────┐ ◀──────────┐
//!   │ Idle │                │ Active │ ───────────┘
//!   └──────┘ ◀───────────── └────────┘
//!            commit / rollback
//!
//!   delete: applied to the mapping in either state
//!   get:    reads the mapping only, never the buffer
//! ```

mod record;
mod table;
mod transaction;

pub use record::Record;
pub use table::Store;
pub use transaction::{RollbackOutcome, TransactionBuffer};
