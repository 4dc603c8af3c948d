//! Tests for the Dictionary store
//!
//! These tests verify:
//! - Add/delete/search/list semantics and normalization
//! - Persistence across reopen and atomic file replacement
//! - Concurrent access patterns (no lost updates, unique-add races)

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use wordvault::store::{Dictionary, DictionaryEntry};
use wordvault::VaultError;

// =============================================================================
// Helper Functions
// =============================================================================

fn temp_dict_path(dir: &TempDir) -> PathBuf {
    dir.path().join("dictionary.json")
}

fn setup_temp_store() -> (TempDir, Dictionary) {
    let temp_dir = TempDir::new().unwrap();
    let store = Dictionary::open(temp_dict_path(&temp_dir)).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_open_bootstraps_backing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dict_path(&temp_dir);

    let store = Dictionary::open(&path).unwrap();

    assert!(path.exists());
    assert!(store.is_empty());
}

#[test]
fn test_add_then_search_round_trip() {
    let (_temp, store) = setup_temp_store();

    store.add("serendipity", "a pleasant surprise").unwrap();

    assert_eq!(store.search("serendipity").unwrap(), "a pleasant surprise");
}

#[test]
fn test_add_duplicate_fails() {
    let (_temp, store) = setup_temp_store();

    store.add("word", "first").unwrap();
    let result = store.add("word", "second");

    assert!(matches!(result, Err(VaultError::WordExists)));
    // The original description survives
    assert_eq!(store.search("word").unwrap(), "first");
}

#[test]
fn test_add_normalizes_word_and_description() {
    let (_temp, store) = setup_temp_store();

    store.add("  HeLLo  ", "  a greeting  ").unwrap();

    assert_eq!(store.search("hello").unwrap(), "a greeting");
    assert_eq!(store.search("HELLO").unwrap(), "a greeting");
    assert!(matches!(
        store.add("hello", "again"),
        Err(VaultError::WordExists)
    ));
}

#[test]
fn test_search_missing_word() {
    let (_temp, store) = setup_temp_store();

    assert!(matches!(
        store.search("nonexistent"),
        Err(VaultError::WordNotFound)
    ));
}

#[test]
fn test_delete_then_search_fails() {
    let (_temp, store) = setup_temp_store();

    store.add("ephemeral", "short-lived").unwrap();
    store.delete("ephemeral").unwrap();

    assert!(matches!(
        store.search("ephemeral"),
        Err(VaultError::WordNotFound)
    ));
}

#[test]
fn test_delete_missing_word() {
    let (_temp, store) = setup_temp_store();

    assert!(matches!(
        store.delete("nonexistent"),
        Err(VaultError::WordNotFound)
    ));
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_list_empty_store() {
    let (_temp, store) = setup_temp_store();

    assert!(store.list().is_empty());
}

#[test]
fn test_list_is_sorted_and_stable() {
    let (_temp, store) = setup_temp_store();

    store.add("zebra", "striped").unwrap();
    store.add("apple", "fruit").unwrap();
    store.add("mango", "also fruit").unwrap();

    let first = store.list();
    let second = store.list();

    assert_eq!(first, vec!["apple", "mango", "zebra"]);
    assert_eq!(first, second);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_entries_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dict_path(&temp_dir);

    {
        let store = Dictionary::open(&path).unwrap();
        store.add("durable", "survives restarts").unwrap();
        store.add("gone", "will be deleted").unwrap();
        store.delete("gone").unwrap();
    }

    let reopened = Dictionary::open(&path).unwrap();
    assert_eq!(reopened.search("durable").unwrap(), "survives restarts");
    assert!(matches!(
        reopened.search("gone"),
        Err(VaultError::WordNotFound)
    ));
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_backing_file_is_parsable_json() {
    let (temp_dir, store) = setup_temp_store();

    store.add("alpha", "first letter").unwrap();

    let bytes = std::fs::read(temp_dict_path(&temp_dir)).unwrap();
    let entries: Vec<DictionaryEntry> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word, "alpha");
    assert_eq!(entries[0].des, "first letter");
}

#[test]
fn test_no_temp_file_left_behind() {
    let (temp_dir, store) = setup_temp_store();

    store.add("tidy", "leaves nothing extra").unwrap();

    let names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["dictionary.json"]);
}

#[test]
fn test_validate_file() {
    let temp_dir = TempDir::new().unwrap();

    let good = temp_dir.path().join("good.json");
    std::fs::write(&good, r#"[{"word": "ok", "des": "fine"}]"#).unwrap();
    assert!(Dictionary::validate_file(&good));

    let bad = temp_dir.path().join("bad.json");
    std::fs::write(&bad, "<dictionary></dictionary>").unwrap();
    assert!(!Dictionary::validate_file(&bad));

    assert!(!Dictionary::validate_file(&temp_dir.path().join("missing.json")));
}

#[test]
fn test_open_skips_empty_words() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dictionary.json");
    std::fs::write(
        &path,
        r#"[{"word": "  ", "des": "blank"}, {"word": "Kept", "des": "stays"}]"#,
    )
    .unwrap();

    let store = Dictionary::open(&path).unwrap();
    assert_eq!(store.list(), vec!["kept"]);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_adds_of_distinct_words_all_land() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.add(&format!("word{:02}", i), "concurrent"))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let words = store.list();
    assert_eq!(words.len(), 16);
    for i in 0..16 {
        assert!(words.contains(&format!("word{:02}", i)));
    }
}

#[test]
fn test_concurrent_adds_of_same_word_one_winner() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.add("contested", "mine"))
        })
        .collect();

    let mut successes = 0;
    let mut exists_failures = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(()) => successes += 1,
            Err(VaultError::WordExists) => exists_failures += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(exists_failures, 7);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_reads_during_mutations() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);
    store.add("stable", "always here").unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..50 {
                store.add(&format!("w{}", i), "d").unwrap();
                store.delete(&format!("w{}", i)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..100 {
                    // A committed entry is always observable
                    assert_eq!(store.search("stable").unwrap(), "always here");
                    let _ = store.list();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.list(), vec!["stable"]);
}

// =============================================================================
// Persistence Failure Tests
// =============================================================================

#[test]
fn test_failed_persist_rolls_back_add() {
    let (temp_dir, store) = setup_temp_store();
    store.add("keep", "stays").unwrap();

    // Occupying the temp path with a directory makes the rewrite fail
    let blocker = temp_dir.path().join("dictionary.json.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let result = store.add("doomed", "never lands");
    assert!(matches!(result, Err(VaultError::Persistence(_))));

    // The mirror rolled back and the persisted state is untouched
    assert_eq!(store.list(), vec!["keep"]);
    let bytes = std::fs::read(temp_dict_path(&temp_dir)).unwrap();
    let entries: Vec<DictionaryEntry> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word, "keep");

    // Once the fault clears, the store works again
    std::fs::remove_dir(&blocker).unwrap();
    store.add("doomed", "now lands").unwrap();
    assert_eq!(store.list(), vec!["doomed", "keep"]);
}

#[test]
fn test_failed_persist_rolls_back_delete() {
    let (temp_dir, store) = setup_temp_store();
    store.add("keep", "stays").unwrap();

    let blocker = temp_dir.path().join("dictionary.json.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let result = store.delete("keep");
    assert!(matches!(result, Err(VaultError::Persistence(_))));

    // The entry is restored in the mirror and still on disk
    assert_eq!(store.search("keep").unwrap(), "stays");
    let bytes = std::fs::read(temp_dict_path(&temp_dir)).unwrap();
    let entries: Vec<DictionaryEntry> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word, "keep");

    std::fs::remove_dir(&blocker).unwrap();
    store.delete("keep").unwrap();
    assert!(store.is_empty());
}
