//! Tests for Store
//!
//! These tests verify:
//! - Reads of absent and committed keys
//! - Immediate deletes
//! - Accessors
//! - Concurrent readers and writers

use std::sync::Arc;
use std::thread;

use slatekv::{Record, SlateError, Store};

// =============================================================================
// Helper Functions
// =============================================================================

fn store_with(entries: &[(&str, &str)]) -> Store {
    Store::from_records(entries.iter().map(|(k, v)| Record::new(*k, *v)))
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = Store::new();

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.active_transaction_id(), None);
    assert_eq!(store.pending_len(), 0);
}

#[test]
fn test_get_nonexistent_key() {
    let store = Store::new();

    for key in ["a", "", "missing", "ключ"] {
        assert_eq!(store.get(key), None);
    }
}

#[test]
fn test_from_records() {
    let store = store_with(&[("a", "1"), ("b", "2")]);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("a"), Some("1".to_string()));
    assert_eq!(store.get("b"), Some("2".to_string()));
    assert!(store.contains_key("a"));
    assert!(!store.contains_key("c"));
}

#[test]
fn test_empty_value_is_found() {
    let store = store_with(&[("k", "")]);

    assert_eq!(store.get("k"), Some(String::new()));
}

#[test]
fn test_put_without_transaction_fails() {
    let store = store_with(&[("a", "1")]);

    let result = store.put("a", "2");
    assert!(matches!(result, Err(SlateError::NoActiveTransaction)));

    let result = store.put("b", "2");
    assert!(matches!(result, Err(SlateError::NoActiveTransaction)));

    assert_eq!(store.snapshot(), store_with(&[("a", "1")]).snapshot());
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_without_transaction() {
    let store = store_with(&[("a", "1")]);

    store.delete("a");

    assert_eq!(store.get("a"), None);
    assert!(store.is_empty());
}

#[test]
fn test_delete_nonexistent_key() {
    let store = store_with(&[("a", "1")]);

    // Should not panic or change anything
    store.delete("zzz");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a"), Some("1".to_string()));
}

#[test]
fn test_delete_twice() {
    let store = store_with(&[("a", "1")]);

    store.delete("a");
    store.delete("a");

    assert_eq!(store.get("a"), None);
}

// =============================================================================
// Snapshot Accessor Tests
// =============================================================================

#[test]
fn test_snapshot_copies_committed_values() {
    let store = store_with(&[("a", "1"), ("b", "2")]);

    let snapshot = store.snapshot();
    store.delete("a");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("a").map(String::as_str), Some("1"));
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_readers() {
    let store = Arc::new(store_with(&[("shared", "value")]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..1000 {
                    assert_eq!(store.get("shared"), Some("value".to_string()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_deletes_and_reads() {
    let store = Arc::new(Store::from_records(
        (0..500).map(|i| Record::new(format!("key{}", i), format!("value{}", i))),
    ));

    let deleter = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in (0..500).step_by(2) {
                store.delete(&format!("key{}", i));
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500 {
                // Either the committed value or gone, never anything else
                if let Some(value) = store.get(&format!("key{}", i)) {
                    assert_eq!(value, format!("value{}", i));
                }
            }
        })
    };

    deleter.join().unwrap();
    reader.join().unwrap();

    assert_eq!(store.len(), 250);
    assert_eq!(store.get("key0"), None);
    assert_eq!(store.get("key1"), Some("value1".to_string()));
}
