//! Persistence Module
//!
//! Whole-file JSON snapshots of the committed mapping.
//!
//! ## Responsibilities
//! - Read a snapshot at startup (missing file = no prior state)
//! - Overwrite the snapshot on demand
//!
//! ## File Format
//! ```text
//! {
//!   "user:1": { "Key": "user:1", "Value": "alice" },
//!   "user:2": { "Key": "user:2", "Value": "bob" }
//! }
//! ```
//!
//! No schema version and no checksum. Writes truncate the file in place
//! (no temporary file + rename, no fsync), so a crash mid-write can leave a
//! partial snapshot behind.

mod snapshot;

pub use snapshot::{decode_snapshot, encode_snapshot, read_snapshot, write_snapshot};
