//! Record definition
//!
//! A stored key/value pair, replaced wholesale on overwrite.

use serde::{Deserialize, Serialize};

/// A key/value pair held by the store or a transaction buffer
///
/// Serialized as `{"Key": ..., "Value": ...}`. The `Key` field repeats the
/// outer map key of the snapshot and is kept for compatibility with existing
/// snapshot files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    /// Older snapshots may carry an empty or missing key
    #[serde(default)]
    pub key: String,

    pub value: String,
}

impl Record {
    /// Create a new record
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
