//! Snapshot reader and writer

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{Result, SlateError};
use crate::store::Record;

/// Decode a snapshot document
///
/// A JSON `null` document decodes as an empty mapping.
pub fn decode_snapshot(bytes: &[u8]) -> Result<HashMap<String, Record>> {
    let entries: Option<HashMap<String, Record>> =
        serde_json::from_slice(bytes).map_err(SlateError::Decode)?;

    Ok(entries.unwrap_or_default())
}

/// Encode the mapping as a snapshot document
pub fn encode_snapshot(entries: &HashMap<String, Record>) -> Result<Vec<u8>> {
    serde_json::to_vec(entries).map_err(SlateError::Encode)
}

/// Read a snapshot file
///
/// Returns:
/// - `Ok(Some(entries))` — file read and decoded
/// - `Ok(None)` — file does not exist
pub fn read_snapshot(path: &Path) -> Result<Option<HashMap<String, Record>>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SlateError::Io(e)),
    };

    decode_snapshot(&bytes).map(Some)
}

/// Write a snapshot file, creating or truncating it
pub fn write_snapshot(path: &Path, entries: &HashMap<String, Record>) -> Result<()> {
    // Encode first so an encode failure never truncates the existing file
    let bytes = encode_snapshot(entries)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    Ok(())
}
